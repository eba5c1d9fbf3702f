//! # posthub-api
//!
//! HTTP client for the remote posts resource (a JSONPlaceholder-style REST
//! API).  Reads return real data; writes are accepted but never persisted,
//! so the client synthesizes the mutation results this session will see.
//!
//! [`PostsApi`] is the seam the cache layer consumes; [`PostsClient`] is
//! the reqwest-backed implementation.

pub mod client;
pub mod config;
pub mod ids;

mod error;

pub use client::{PostsApi, PostsClient};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
