//! Provider fetch error types.

/// Errors from fetching a provider response.
///
/// Everything except `Api` is a transport-level failure: the provider never
/// gave us a status code to act on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider base URL could not be turned into a request URL
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    /// Provider answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl FetchError {
    /// The upstream status code, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
