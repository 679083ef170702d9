use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    /// A caller precondition was violated (bad length, salt, golden digest...).
    #[error("config error: {0}")]
    Config(String),

    /// A lane worker disconnected before delivering all of its digests.
    #[error("lane error: {0}")]
    Lane(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while writing CSV results.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure while writing the JSON summary.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}
