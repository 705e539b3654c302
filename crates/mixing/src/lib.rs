//! Mixing ratios of particle groups from particle tracking results
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod analyzer;
mod error;
mod names;
mod options;
mod particle;
mod table;

// Inline anything important for a nice public API
#[doc(inline)]
pub use analyzer::{aggregate, TrackingAnalyzer};

#[doc(inline)]
pub use names::NameTable;

#[doc(inline)]
pub use options::{
    MixingOptions, SourceResolution, Umbrella, UmbrellaMap, VelocityWeighting, Weighting,
};

#[doc(inline)]
pub use particle::{mixing_fraction, Category, TrackedParticle, OTHERS};

#[doc(inline)]
pub use table::{MixingTable, OutputShape};

#[doc(inline)]
pub use error::{Error, Result};
