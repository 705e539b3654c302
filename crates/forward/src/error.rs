//! Result and Error types for the forward module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, forward::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tracktools-forward`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to read a JSON configuration
    #[error("invalid JSON configuration")]
    Json(#[from] serde_json::Error),

    /// Error from the binary grid file
    #[error(transparent)]
    Grid(#[from] tracktools_grid::Error),

    /// Error from the cell budget file
    #[error(transparent)]
    Budget(#[from] tracktools_budget::Error),

    /// Error from the particle tracking output
    #[error(transparent)]
    Modpath(#[from] tracktools_modpath::Error),

    /// Error from the mixing ratio calculation
    #[error(transparent)]
    Mixing(#[from] tracktools_mixing::Error),

    /// Failure while reading or querying an input file of a case
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Input file of a case does not exist
    #[error("missing input file {0:?}")]
    MissingFile(PathBuf),

    /// Directory name without a numeric case id
    #[error("no case id in directory name {0:?}")]
    InvalidCaseName(PathBuf),

    /// Root directory without any case
    #[error("no case directories starting with \"{prefix}\" in {root:?}")]
    NoCases { root: PathBuf, prefix: String },

    /// External command configured as an empty string
    #[error("empty command for the {0} program")]
    EmptyCommand(String),

    /// External program exited with a failure
    #[error("\"{command}\" failed in {dir:?} ({status})")]
    CommandFailed {
        command: String,
        dir: PathBuf,
        status: std::process::ExitStatus,
    },

    /// At least one case of a batch failed
    #[error("{failed} of {total} cases failed")]
    CasesFailed { failed: usize, total: usize },
}

impl Error {
    /// Message followed by every underlying cause, separated by colons
    ///
    /// ```rust
    /// # use tracktools_forward::Error;
    /// let e = Error::Read {
    ///     path: "ml_01/ml.cbc".into(),
    ///     source: Box::new(Error::MissingFile("ml_01/ml.cbc".into())),
    /// };
    /// assert_eq!(
    ///     e.report(),
    ///     "failed to read \"ml_01/ml.cbc\": missing input file \"ml_01/ml.cbc\""
    /// );
    /// ```
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
