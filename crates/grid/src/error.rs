//! Result and Error types for the grid module

use crate::grid::DataType;

/// Type alias for `Result<T, grid::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tracktools-grid`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// One of the fixed header lines is not what was expected
    #[error("invalid grid file header (expected {expected}, found {found:?})")]
    InvalidHeader { expected: String, found: String },

    /// Grid type is not one of DIS, DISV, or DISU
    #[error("unknown grid type \"{0}\"")]
    UnknownGridType(String),

    /// Array definition line could not be parsed
    #[error("failed to parse array definition from \"{0}\"")]
    InvalidDefinition(String),

    /// Array dimensions too large to address
    #[error("dimensions {shape:?} of \"{name}\" are too large")]
    OversizedArray { name: String, shape: Vec<usize> },

    /// Requested array is not defined in the file
    #[error("array \"{0}\" not found in grid file")]
    MissingArray(String),

    /// Requested array exists but holds another type
    #[error("array \"{name}\" holds {found:?} values, expected {expected:?}")]
    UnexpectedDataType {
        name: String,
        expected: DataType,
        found: DataType,
    },

    /// Array length is inconsistent with the rest of the grid
    #[error("unexpected length for \"{name}\" (expected {expected}, found {found})")]
    UnexpectedLength {
        name: String,
        expected: usize,
        found: usize,
    },

    /// 1-based index below 1
    #[error("invalid 1-based index {value} at position {position} of \"{name}\"")]
    InvalidIndex {
        name: String,
        position: usize,
        value: i32,
    },

    /// Offset array that is not monotonically increasing
    #[error("offsets in \"{name}\" decrease at position {position}")]
    NonMonotonicOffsets { name: String, position: usize },
}
