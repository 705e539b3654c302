//! Module for reading MODFLOW 6 binary grid files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod grid;
mod parsers;
mod reader;

// Inline anything important for a nice public API
#[doc(inline)]
pub use grid::{BinaryGrid, DataType, Definition, GridArray, GridType};

#[doc(inline)]
pub use reader::{read_grid, read_grid_file};

#[doc(inline)]
pub use error::{Error, Result};
