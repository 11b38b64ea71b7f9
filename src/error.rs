//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for drive-mcp operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()`
/// and `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error surfaced by the Drive API collaborator.
#[derive(Debug, Error)]
pub enum DriveError {
    /// The API answered with a structured error payload.
    #[error("Google API error: {message} (code {code})")]
    Api { code: u16, message: String },

    /// Request never produced a usable response (connect, timeout, TLS).
    #[error("Drive transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived but could not be decoded into the expected shape.
    #[error("unexpected Drive API response: {0}")]
    Decode(String),

    /// Credentials missing, rejected, or not refreshable.
    #[error("Drive authentication failed: {0}")]
    Auth(String),
}

impl DriveError {
    /// Whether a retry with backoff can plausibly succeed.
    ///
    /// Mirrors the Drive quota semantics: 403/429 are rate-limit shaped,
    /// 5xx are transient server conditions, and some quota failures only
    /// announce themselves in the message text.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { code, message } => {
                matches!(code, 403 | 429 | 500 | 502 | 503 | 504)
                    || message.contains("rate limit")
                    || message.contains("quota")
            }
            Self::Transport(err) => err.is_timeout() || err.is_connect(),
            Self::Decode(_) | Self::Auth(_) => false,
        }
    }
}
