use thiserror::Error;

use posthub_api::ApiError;

/// Errors produced by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Non-positive ids are refused before any network activity.
    #[error("Invalid post id: {0}")]
    InvalidId(i64),

    /// The underlying client failed; the error passes through unmodified.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CacheError {
    /// True when the remote reported the post as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::Api(ApiError::NotFound(_)))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
