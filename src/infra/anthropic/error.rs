use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnthropicError {
    /// The credential contains bytes that cannot go into a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// Transport-level failure (connect, body read, JSON decode).
    #[error("request to model endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response carried no text content block.
    #[error("model response contained no text content")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, AnthropicError>;
