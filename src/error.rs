//! Error types shared by every layer of the crate.

use thiserror::Error;

/// Everything that can go wrong while resolving the current song.
///
/// "Nothing is playing and there is no play history" is not an error; it is
/// reported as `Ok(None)` by the fetch operations.
#[derive(Error, Debug)]
pub enum NowPlayingError {
    /// Missing or malformed construction arguments (credentials, durations,
    /// unknown provider names). Raised before any network traffic happens.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider rejected a token exchange or a play history request.
    #[error("Upstream error (status {status}): {message}")]
    UpstreamAuth { status: u16, message: String },

    /// Transport level failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider response (or a cached value) could not be decoded.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider returned a track that cannot be turned into a `Song`.
    #[error("Invalid track: {0}")]
    InvalidTrack(String),
}

impl NowPlayingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamAuth {
            status,
            message: message.into(),
        }
    }

    /// Returns the upstream status code when the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamAuth { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
