//! Result and Error types for the modpath module

/// Type alias for `Result<T, modpath::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tracktools-modpath`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// First line does not identify the expected file type
    #[error("expected a \"{expected}\" header, found \"{found}\"")]
    InvalidHeader { expected: String, found: String },

    /// Only MODPATH 7 output is understood
    #[error("unsupported MODPATH file version {0}")]
    UnsupportedVersion(u32),

    /// Header line that could not be parsed
    #[error("invalid {name} on header line {line}: \"{content}\"")]
    InvalidHeaderLine {
        name: String,
        line: usize,
        content: String,
    },

    /// File ended before the header was closed with `END HEADER`
    #[error("header is not terminated by END HEADER")]
    MissingHeaderEnd,

    /// Data line that could not be parsed
    #[error("invalid record on line {line}: \"{content}\"")]
    InvalidRecord { line: usize, content: String },

    /// File ended in the middle of a particle
    #[error("unexpected end of file, {missing} points missing for particle {particle}")]
    IncompletePathline { particle: usize, missing: usize },
}
