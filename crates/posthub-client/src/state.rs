//! Application wiring: build the client stack once, hand out screens.
//!
//! Every screen shares one [`QueryCache`], so a collection fetched for the
//! browse page is reused by the admin table, and a mutation settled on the
//! admin page invalidates what the reader shows.

use std::sync::Arc;

use tracing::info;

use posthub_api::{ApiConfig, PostsApi, PostsClient};
use posthub_cache::{CacheConfig, QueryCache};

use crate::screens::admin::AdminScreen;
use crate::screens::browse::BrowseScreen;
use crate::screens::detail::DetailScreen;

/// Shared application state: one cache over one API client.
pub struct App {
    cache: Arc<QueryCache>,
}

impl App {
    /// Build the full stack from explicit configuration.
    pub fn new(api: ApiConfig, cache: CacheConfig) -> posthub_api::Result<Self> {
        info!(base_url = %api.base_url, "Building PostHub client");
        let client = PostsClient::new(&api)?;
        Ok(Self::with_api(Arc::new(client), cache))
    }

    /// Build from `POSTHUB_*` environment variables.
    pub fn from_env() -> posthub_api::Result<Self> {
        Self::new(ApiConfig::from_env(), CacheConfig::from_env())
    }

    /// Build over any [`PostsApi`] implementation.
    pub fn with_api(api: Arc<dyn PostsApi>, cache: CacheConfig) -> Self {
        Self {
            cache: Arc::new(QueryCache::new(api, &cache)),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn browse(&self) -> BrowseScreen {
        BrowseScreen::new(Arc::clone(&self.cache))
    }

    pub fn detail(&self) -> DetailScreen {
        DetailScreen::new(Arc::clone(&self.cache))
    }

    pub fn admin(&self) -> AdminScreen {
        AdminScreen::new(Arc::clone(&self.cache))
    }
}
