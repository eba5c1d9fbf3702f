//! # posthub-cache
//!
//! Keyed async cache over the posts resource, the application's single
//! source of truth for what exists remotely.  Results are cached per query
//! key with a staleness window, concurrent reads of a key share one
//! underlying request, and every settled mutation invalidates the posts
//! keys so the next read re-fetches.  Each operation publishes its
//! lifecycle through an observable [`StatusCell`].

pub mod cache;
pub mod config;
pub mod key;
pub mod status;

mod error;

pub use cache::{CachedValue, MutationOutcome, QueryCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use key::QueryKey;
pub use status::{OpState, OpStatus, StatusCell};
