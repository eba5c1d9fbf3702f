//! Test doubles shared by the form and screen tests.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use posthub_api::{ApiError, PostsApi};
use posthub_cache::{CacheConfig, QueryCache};
use posthub_shared::{Post, PostDraft};

pub(crate) fn post(id: i64, title: &str, body: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: body.to_string(),
        user_id: 1,
    }
}

/// `n` posts with ids `1..=n`.
pub(crate) fn seed(n: usize) -> Vec<Post> {
    (1..=n as i64)
        .map(|id| post(id, &format!("Post {id}"), &format!("Body {id}")))
        .collect()
}

/// Scripted [`PostsApi`] standing in for the remote resource.
///
/// Writes are accepted but never change the stored list, matching the
/// read-only remote the real client talks to: a re-fetch after any
/// mutation returns the original collection.
pub(crate) struct FakeApi {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
    pub(crate) gated: AtomicBool,
    pub(crate) entered: Notify,
    pub(crate) release: Notify,
    pub(crate) list_calls: AtomicUsize,
    pub(crate) get_calls: AtomicUsize,
    pub(crate) create_calls: AtomicUsize,
    pub(crate) update_calls: AtomicUsize,
    pub(crate) delete_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn with_posts(posts: Vec<Post>) -> Arc<Self> {
        Arc::new(Self {
            posts: Mutex::new(posts),
            next_id: AtomicI64::new(101),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            gated: AtomicBool::new(false),
            entered: Notify::new(),
            release: Notify::new(),
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        })
    }

    /// Park the call until the test calls `release.notify_one()`.
    async fn gate(&self) {
        if self.gated.load(Ordering::Relaxed) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }

    fn check(&self, switch: &AtomicBool) -> posthub_api::Result<()> {
        if switch.load(Ordering::Relaxed) {
            Err(ApiError::Remote { status: 500 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list(&self) -> posthub_api::Result<Vec<Post>> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        self.gate().await;
        self.check(&self.fail_reads)?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn get(&self, id: i64) -> posthub_api::Result<Post> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        self.gate().await;
        self.check(&self.fail_reads)?;
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    async fn create(&self, draft: &PostDraft) -> posthub_api::Result<Post> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        self.gate().await;
        self.check(&self.fail_writes)?;
        Ok(Post {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: draft.title.clone(),
            body: draft.body.clone(),
            user_id: 1,
        })
    }

    async fn update(&self, id: i64, draft: &PostDraft) -> posthub_api::Result<Post> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        self.gate().await;
        self.check(&self.fail_writes)?;
        Ok(Post {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
            user_id: 1,
        })
    }

    async fn delete(&self, _id: i64) -> posthub_api::Result<()> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        self.gate().await;
        self.check(&self.fail_writes)?;
        Ok(())
    }
}

pub(crate) fn cache_over(api: Arc<FakeApi>) -> Arc<QueryCache> {
    Arc::new(QueryCache::new(api, &CacheConfig::default()))
}
