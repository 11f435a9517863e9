//! Gateway error types.

/// Errors from fetching an upstream dataset.
///
/// Carries only plain data so callers never depend on the HTTP library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrievalError {
    /// Network-level failure (connection refused, timeout, TLS, ...)
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Upstream answered with something other than 200 OK
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body could not be decoded into the expected shape
    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },
}

impl RetrievalError {
    /// The URL the failed request was made against.
    pub fn url(&self) -> &str {
        match self {
            RetrievalError::Transport { url, .. }
            | RetrievalError::Status { url, .. }
            | RetrievalError::Decode { url, .. } => url,
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        RetrievalError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
