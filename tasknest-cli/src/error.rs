/// CLI error type
///
/// Validation failures and store failures both exit with code 1, but print
/// differently: validation errors are the user's fault and get a plain
/// `Error:` line, store errors get an `Unexpected error:` line.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// The local database failed
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}
