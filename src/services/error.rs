// src/services/error.rs
use thiserror::Error;

/// Failure talking to an upstream feed. "No data" is not an error: adapters
/// return `Ok(None)` / an empty list for that.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Connect failure, timeout or non-success status.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The body could not be decoded at all.
    #[error("{provider} returned a malformed payload: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },
}

impl FeedError {
    pub fn transport(provider: &'static str) -> impl FnOnce(reqwest::Error) -> FeedError {
        move |source| FeedError::Transport { provider, source }
    }

    pub fn malformed(provider: &'static str, message: impl Into<String>) -> Self {
        FeedError::Malformed {
            provider,
            message: message.into(),
        }
    }
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
