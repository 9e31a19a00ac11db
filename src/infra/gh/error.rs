use thiserror::Error;

#[derive(Debug, Error)]
pub enum GhError {
    /// The tracker binary could not be spawned at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tracker ran but exited non-zero.
    #[error("gh exited with {status}: {stderr}")]
    CommandFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The tracker produced output that is not the expected JSON.
    #[error("failed to parse gh output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GhError>;
