use thiserror::Error;

/// Errors produced by the remote resource client.
///
/// Payloads are plain strings and integers so a settled result can be
/// cloned out to every waiter sharing a deduplicated request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a usable response (DNS, connect, TLS,
    /// timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Remote error: HTTP {status}")]
    Remote { status: u16 },

    /// A single-post lookup for an id the server does not know.
    #[error("Post {0} not found")]
    NotFound(i64),

    /// The response arrived but its body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
