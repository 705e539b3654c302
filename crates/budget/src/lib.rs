//! Module for reading MODFLOW 6 cell-by-cell budget files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod boundary;
mod budget;
mod connectivity;
mod error;
mod reader;

// Inline anything important for a nice public API
#[doc(inline)]
pub use budget::{
    BudgetRecord, CellBudget, ListData, ListEntry, RecordData, RecordHeader, FLOW_JA_FACE,
};

#[doc(inline)]
pub use boundary::{BoundaryFluxes, BoundaryRecord};

#[doc(inline)]
pub use connectivity::FlowConnectivity;

#[doc(inline)]
pub use reader::{read_budget, read_budget_file};

#[doc(inline)]
pub use error::{Error, Result};
