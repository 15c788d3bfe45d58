//! Error taxonomy for the generative-language API
//!
//! Every failure surfaces as a single value to the immediate caller; there
//! is no automatic retry anywhere. Retrying is a user action.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request exceeded its deadline and was cancelled. Retriable.
    #[error("Request timed out; try again in a moment")]
    Timeout,

    /// Non-2xx HTTP status. The response body is logged, not surfaced.
    #[error("Server returned an error ({status})")]
    Server { status: u16 },

    /// The model answered, but the safety filter blocked the content.
    /// Not retriable with the same input.
    #[error("Blocked by safety filter: {0}")]
    Blocked(String),

    /// The response was cut off at the output token limit. Retriable after
    /// raising the cap or shortening the input.
    #[error("Response hit the max token limit; raise maxTokens or shorten the text")]
    Truncated,

    /// HTTP success but no usable text in the payload. Retriable.
    #[error("Empty or malformed response from the model")]
    EmptyResponse,

    /// Caught locally before any request is built.
    #[error("{0}")]
    Validation(String),

    /// Transport failure other than a timeout.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
