//! Result and Error types for the mixing module

/// Type alias for `Result<T, mixing::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tracktools-mixing`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to read or write CSV data
    #[error("failure in CSV reader/writer")]
    Csv(#[from] csv::Error),

    /// Error from reading or querying the budget
    #[error(transparent)]
    Budget(#[from] tracktools_budget::Error),

    /// Error from reading the particle tracking output
    #[error(transparent)]
    Modpath(#[from] tracktools_modpath::Error),

    /// Same id listed twice in a name table
    #[error("id {0} is listed more than once in the name table")]
    DuplicateId(i64),

    /// Particle group not found in the group name table
    #[error("particle group {0} has no name in the group table")]
    UnknownGroup(i64),

    /// Source identity not found in the identity name table
    #[error("source identity {0} has no name in the identity table")]
    UnknownIdentity(i64),

    /// Auxiliary value that cannot be an identity
    #[error("\"{field}\" value {value} is not an integer identity")]
    InvalidIdentity { field: String, value: f64 },

    /// Umbrella member that is not a known source identity
    #[error("umbrella member \"{0}\" is not a known source identity")]
    UnknownIdentityName(String),

    /// Identity listed under more than one umbrella
    #[error("source identity \"{0}\" belongs to more than one umbrella")]
    OverlappingUmbrellas(String),

    /// Category name that collides with another or with OTHERS
    #[error("category name \"{0}\" is used more than once")]
    DuplicateCategory(String),

    /// Category not present in the mixing table
    #[error("category \"{0}\" is not in the mixing table")]
    UnknownCategory(String),

    /// Budget weighting without inter-cell fluxes
    #[error("budget weighting requires the flow connectivity")]
    MissingConnectivity,

    /// Velocity weighting without pathlines
    #[error("velocity weighting requires the pathlines")]
    MissingPathlines,

    /// Per-identity resolution without an identity name table
    #[error("resolving source identities requires an identity name table")]
    MissingIdentityNames,
}
