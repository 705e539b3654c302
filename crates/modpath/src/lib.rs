//! Module for reading MODPATH 7 particle tracking output
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod endpoint;
mod error;
mod parsers;
mod particle;
mod pathline;
mod reader;

// Inline anything important for a nice public API
#[doc(inline)]
pub use endpoint::{Endpoint, EndpointFile, EndpointHeader};

#[doc(inline)]
pub use pathline::{Pathline, PathlineFile, PathlineHeader, PathlinePoint, VelocitySampling};

#[doc(inline)]
pub use particle::{Location, Point, TrackingDirection};

#[doc(inline)]
pub use reader::{read_endpoint_file, read_endpoints, read_pathline_file, read_pathlines};

#[doc(inline)]
pub use error::{Error, Result};
