//! Result and Error types for the budget module

/// Type alias for `Result<T, budget::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tracktools-budget`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to deserialise a byte stream
    #[error("failed to deserialise byte stream")]
    UnableToDeserialise(#[from] Box<bincode::ErrorKind>),

    /// Storage method that is not written by MODFLOW 6
    #[error("unsupported storage method {imeth} for \"{text}\"")]
    UnsupportedMethod { text: String, imeth: i32 },

    /// Requested budget term does not exist in the file
    #[error("budget term \"{0}\" not found")]
    MissingBudgetTerm(String),

    /// Requested record index is beyond the records available for a term
    #[error("record {index} of \"{text}\" requested, only {available} available")]
    RecordOutOfRange {
        text: String,
        index: usize,
        available: usize,
    },

    /// No record of a term for the requested time step
    #[error("no \"{text}\" record for time step {kstp} of period {kper}")]
    MissingTimeStep { text: String, kstp: i32, kper: i32 },

    /// Record has the wrong storage layout for the request
    #[error("record \"{text}\" is not stored as {expected}")]
    UnexpectedLayout { text: String, expected: String },

    /// Auxiliary variable not written by the boundary package
    #[error("auxiliary \"{name}\" not found for \"{text}\"")]
    MissingAuxiliary { text: String, name: String },

    /// 1-based node number below 1
    #[error("invalid 1-based node {value} in \"{text}\"")]
    InvalidNode { text: String, value: i32 },

    /// Cell index beyond the connectivity arrays
    #[error("node {node} out of range for {n_cells} cells")]
    NodeOutOfRange { node: usize, n_cells: usize },

    /// Offsets and fluxes that do not describe the same connections
    #[error("inconsistent connectivity ({0})")]
    InconsistentConnectivity(String),
}
