//! Forward run glue for particle tracking mixing ratio cases
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod case;
mod config;
mod error;
mod pproc;
mod program;

// Inline anything important for a nice public API
#[doc(inline)]
pub use case::{discover_cases, Case};

#[doc(inline)]
pub use config::CaseConfig;

#[doc(inline)]
pub use pproc::{load_analyzer, postprocess_case, run_case, run_cases, CaseOutcome, RunOptions};

#[doc(inline)]
pub use program::run_program;

#[doc(inline)]
pub use error::{Error, Result};
