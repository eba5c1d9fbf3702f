//! Post reader: a single post with derived presentation data.
//!
//! The remote resource carries no category or engagement data, so the
//! reader derives a category from the post id and shows fixed engagement
//! baselines, bumped by the session-local like mark.

use std::sync::Arc;

use serde::Serialize;

use posthub_cache::{CacheError, QueryCache, Result};
use posthub_shared::constants::{
    BASELINE_COMMENTS, BASELINE_LIKES, BASELINE_VIEWS, CATEGORIES, FALLBACK_READ_MINUTES,
    READ_CHARS_PER_MINUTE,
};
use posthub_shared::Post;

/// What the reader shows for one post.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub post: Post,
    /// Display category, derived from the post id.
    pub category: &'static str,
    /// Estimated reading time in minutes.
    pub read_minutes: u32,
    pub likes: u32,
    pub comments: u32,
    pub views: u32,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

/// Outcome of loading the reader for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Loaded(DetailView),
    /// No such post: a non-positive id or a remote 404.
    Missing,
}

/// State behind the reader page.
pub struct DetailScreen {
    cache: Arc<QueryCache>,
    liked: bool,
    bookmarked: bool,
}

impl DetailScreen {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            liked: false,
            bookmarked: false,
        }
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }

    pub fn toggle_bookmark(&mut self) {
        self.bookmarked = !self.bookmarked;
    }

    /// True while a post fetch is in flight; the page shows its loading
    /// placeholder instead of stale content.
    pub fn is_loading(&self) -> bool {
        self.cache.single_status().is_pending()
    }

    /// Load the post and derive the reader view.
    ///
    /// Bad ids and remote 404s both come back as [`DetailOutcome::Missing`];
    /// transport errors propagate so the page can offer a retry.
    pub async fn load(&self, id: i64) -> Result<DetailOutcome> {
        match self.cache.post(id).await {
            Ok(post) => Ok(DetailOutcome::Loaded(self.view(Post::clone(&post)))),
            Err(CacheError::InvalidId(_)) => Ok(DetailOutcome::Missing),
            Err(err) if err.is_not_found() => Ok(DetailOutcome::Missing),
            Err(err) => Err(err),
        }
    }

    fn view(&self, post: Post) -> DetailView {
        DetailView {
            category: category_for(post.id),
            read_minutes: read_minutes(&post.body),
            likes: BASELINE_LIKES + u32::from(self.liked),
            comments: BASELINE_COMMENTS,
            views: BASELINE_VIEWS,
            is_liked: self.liked,
            is_bookmarked: self.bookmarked,
            post,
        }
    }
}

/// Display category for a post id.
pub fn category_for(id: i64) -> &'static str {
    CATEGORIES[id.rem_euclid(CATEGORIES.len() as i64) as usize]
}

/// Estimated reading time for `body`, with a floor for empty bodies.
pub fn read_minutes(body: &str) -> u32 {
    let chars = body.chars().count();
    if chars == 0 {
        FALLBACK_READ_MINUTES
    } else {
        chars.div_ceil(READ_CHARS_PER_MINUTE) as u32
    }
}
