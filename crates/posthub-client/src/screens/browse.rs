//! Public browse page: searchable, paginated post cards.
//!
//! The screen never copies the collection; every [`BrowseScreen::load`]
//! pulls the cached list and projects the current page through the search
//! filter.  Like and bookmark marks are session-local, the remote has no
//! engagement data.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use posthub_cache::{QueryCache, Result};
use posthub_shared::constants::POSTS_PER_PAGE;
use posthub_shared::Post;

use crate::filter::filter_posts;
use crate::pagination::Pager;

/// Card layout toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// One card on the browse page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub post: Post,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

/// What the browse page renders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseSnapshot {
    /// Cards for the current page.
    pub cards: Vec<PostCard>,
    pub view_mode: ViewMode,
    pub page: usize,
    pub total_pages: usize,
    /// Page buttons to show.
    pub page_numbers: Vec<usize>,
    /// Posts matching the search, across all pages.
    pub matching: usize,
    /// Size of the whole collection, ignoring the search.
    pub total: usize,
}

/// State behind the browse page.
pub struct BrowseScreen {
    cache: Arc<QueryCache>,
    search: String,
    view_mode: ViewMode,
    pager: Pager,
    liked: HashSet<i64>,
    bookmarked: HashSet<i64>,
}

impl BrowseScreen {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            search: String::new(),
            view_mode: ViewMode::default(),
            pager: Pager::new(POSTS_PER_PAGE),
            liked: HashSet::new(),
            bookmarked: HashSet::new(),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.pager.next();
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    pub fn toggle_like(&mut self, id: i64) {
        if !self.liked.insert(id) {
            self.liked.remove(&id);
        }
    }

    pub fn toggle_bookmark(&mut self, id: i64) {
        if !self.bookmarked.insert(id) {
            self.bookmarked.remove(&id);
        }
    }

    /// Fetch (or reuse) the collection and project the current page.
    pub async fn load(&mut self) -> Result<BrowseSnapshot> {
        let posts = self.cache.posts().await?;
        let filtered = filter_posts(&posts, &self.search);
        self.pager.set_total(filtered.len());

        let cards = self
            .pager
            .slice(&filtered)
            .iter()
            .map(|&p| PostCard {
                post: p.clone(),
                is_liked: self.liked.contains(&p.id),
                is_bookmarked: self.bookmarked.contains(&p.id),
            })
            .collect();

        Ok(BrowseSnapshot {
            cards,
            view_mode: self.view_mode,
            page: self.pager.current(),
            total_pages: self.pager.total_pages(),
            page_numbers: self.pager.window(),
            matching: filtered.len(),
            total: posts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::Ordering;

    use posthub_api::ApiError;
    use posthub_cache::CacheError;

    use crate::testing::{cache_over, seed, FakeApi};

    #[tokio::test]
    async fn test_twenty_three_posts_paginate_ten_ten_three() {
        let api = FakeApi::with_posts(seed(23));
        let mut screen = BrowseScreen::new(cache_over(api.clone()));

        let snap = screen.load().await.unwrap();
        assert_eq!(snap.cards.len(), 10);
        assert_eq!(snap.total_pages, 3);
        assert_eq!(snap.page_numbers, vec![1, 2, 3]);
        assert_eq!(snap.total, 23);

        screen.set_page(3);
        let snap = screen.load().await.unwrap();
        assert_eq!(snap.cards.len(), 3);
        assert_eq!(snap.cards[0].post.id, 21);

        // One fetch served all three renders.
        assert_eq!(api.list_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_search_narrows_and_rebalances_the_page() {
        let api = FakeApi::with_posts(seed(23));
        let mut screen = BrowseScreen::new(cache_over(api));

        screen.load().await.unwrap();
        screen.set_page(3);

        // "Post 1" matches post 1 and posts 10 through 19.
        screen.set_search("Post 1");
        let snap = screen.load().await.unwrap();
        assert_eq!(snap.matching, 11);
        assert_eq!(snap.total_pages, 2);

        // Page 3 no longer exists; the view fell back to the last page.
        assert_eq!(snap.page, 2);
        assert_eq!(snap.cards.len(), 1);
        assert_eq!(snap.cards[0].post.id, 19);
    }

    #[tokio::test]
    async fn test_view_mode_defaults_to_grid() {
        let api = FakeApi::with_posts(seed(1));
        let mut screen = BrowseScreen::new(cache_over(api));

        let snap = screen.load().await.unwrap();
        assert_eq!(snap.view_mode, ViewMode::Grid);

        screen.set_view_mode(ViewMode::List);
        let snap = screen.load().await.unwrap();
        assert_eq!(snap.view_mode, ViewMode::List);
    }

    #[tokio::test]
    async fn test_likes_and_bookmarks_mark_single_cards() {
        let api = FakeApi::with_posts(seed(3));
        let mut screen = BrowseScreen::new(cache_over(api));

        screen.toggle_like(2);
        screen.toggle_bookmark(3);
        let snap = screen.load().await.unwrap();

        assert!(!snap.cards[0].is_liked);
        assert!(snap.cards[1].is_liked);
        assert!(!snap.cards[1].is_bookmarked);
        assert!(snap.cards[2].is_bookmarked);

        screen.toggle_like(2);
        let snap = screen.load().await.unwrap();
        assert!(!snap.cards[1].is_liked);
    }

    #[tokio::test]
    async fn test_load_error_propagates() {
        let api = FakeApi::with_posts(seed(3));
        api.fail_reads.store(true, Ordering::Relaxed);
        let mut screen = BrowseScreen::new(cache_over(api));

        let err = screen.load().await.unwrap_err();
        assert_eq!(err, CacheError::Api(ApiError::Remote { status: 500 }));
    }

    #[tokio::test]
    async fn test_snapshot_serializes_camel_case() {
        let api = FakeApi::with_posts(seed(1));
        let mut screen = BrowseScreen::new(cache_over(api));

        let snap = screen.load().await.unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["viewMode"], "grid");
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["cards"][0]["isLiked"], false);
        assert_eq!(json["cards"][0]["post"]["userId"], 1);
    }
}
