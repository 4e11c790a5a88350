//! Arrivals feed error types.

/// Errors that can occur when fetching the arrivals feed.
///
/// Messages are kept as strings so the error can be cloned and shared
/// between callers waiting on the same fetch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrivalsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error from {url}: {message}")]
    Http { url: String, message: String },

    /// Source returned an error status
    #[error("API error {status} from {url}")]
    Api { url: String, status: u16 },

    /// Failed to parse response JSON
    #[error("JSON parse error from {url}: {message}")]
    Json { url: String, message: String },

    /// Every configured source failed
    #[error("all {} arrivals sources failed: {}", .0.len(), .0.join("; "))]
    AllSourcesFailed(Vec<String>),

    /// No sources configured
    #[error("no arrivals sources configured")]
    NotConfigured,
}
