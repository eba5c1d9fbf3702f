//! Read-through query cache and mutation layer over the posts resource.
//!
//! Reads are served from cache while the entry is inside the staleness
//! window.  Concurrent reads of the same key share one underlying request,
//! and the request itself runs in a spawned task, so a caller that loses
//! interest never aborts the network call; a late response lands in the
//! cache and is served to the next reader.  Every settled mutation, success
//! or failure, invalidates the posts keys so the next read re-fetches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use posthub_api::{ApiError, PostsApi};
use posthub_shared::{Post, PostDraft};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::key::QueryKey;
use crate::status::StatusCell;

// ---------------------------------------------------------------------------
// Values and slots
// ---------------------------------------------------------------------------

/// A value held by the cache, tagged by the kind of key it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    List(Arc<Vec<Post>>),
    Single(Arc<Post>),
}

/// What a settled mutation produced.
///
/// One enum for all three mutations, so a view model can apply any
/// mutation's local effect with a single exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(Post),
    Updated(Post),
    Deleted { id: i64 },
}

struct Entry<T> {
    value: T,
    fetched_at: Instant,
    stale: bool,
}

impl<T> Entry<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            stale: false,
        }
    }

    fn is_fresh(&self, stale_after: Duration) -> bool {
        !self.stale && self.fetched_at.elapsed() < stale_after
    }
}

/// Cache state for one key: the entry, the in-flight fetch if any, and a
/// generation counter bumped by invalidation so a response from before an
/// invalidation is written back already stale.
struct Slot<T> {
    entry: Option<Entry<T>>,
    inflight: Option<broadcast::Sender<Result<T>>>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            entry: None,
            inflight: None,
            generation: 0,
        }
    }
}

impl<T> Slot<T> {
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(entry) = &mut self.entry {
            entry.stale = true;
        }
    }
}

struct Inner {
    list: Slot<Arc<Vec<Post>>>,
    singles: HashMap<i64, Slot<Arc<Post>>>,
}

impl Inner {
    /// Invalidate the collection and, because the collection key is a
    /// prefix of every single-post key, all single-post entries with it.
    fn invalidate_posts(&mut self) {
        self.list.invalidate();
        for slot in self.singles.values_mut() {
            slot.invalidate();
        }
    }
}

/// Read plan decided under the lock: either join an in-flight fetch or
/// start one (the sender is already registered in the slot).
enum Plan<T> {
    Join(broadcast::Receiver<Result<T>>),
    Start {
        tx: broadcast::Sender<Result<T>>,
        rx: broadcast::Receiver<Result<T>>,
        generation: u64,
    },
}

// ---------------------------------------------------------------------------
// QueryCache
// ---------------------------------------------------------------------------

/// Keyed cache over a [`PostsApi`], the single source of truth for what the
/// application believes currently exists remotely.
pub struct QueryCache {
    api: Arc<dyn PostsApi>,
    stale_after: Duration,
    inner: Arc<Mutex<Inner>>,
    list_fetch: StatusCell,
    single_fetch: StatusCell,
    create_op: StatusCell,
    update_op: StatusCell,
    delete_op: StatusCell,
}

impl QueryCache {
    pub fn new(api: Arc<dyn PostsApi>, config: &CacheConfig) -> Self {
        Self {
            api,
            stale_after: config.stale_after,
            inner: Arc::new(Mutex::new(Inner {
                list: Slot::default(),
                singles: HashMap::new(),
            })),
            list_fetch: StatusCell::new(),
            single_fetch: StatusCell::new(),
            create_op: StatusCell::new(),
            update_op: StatusCell::new(),
            delete_op: StatusCell::new(),
        }
    }

    // -- Reads --------------------------------------------------------------

    /// The post collection, from cache when fresh.
    pub async fn posts(&self) -> Result<Arc<Vec<Post>>> {
        let plan = {
            let mut inner = self.inner.lock().await;
            if let Some(entry) = &inner.list.entry {
                if entry.is_fresh(self.stale_after) {
                    return Ok(Arc::clone(&entry.value));
                }
            }
            if let Some(tx) = &inner.list.inflight {
                Plan::Join(tx.subscribe())
            } else {
                let (tx, rx) = broadcast::channel(1);
                inner.list.inflight = Some(tx.clone());
                Plan::Start {
                    tx,
                    rx,
                    generation: inner.list.generation,
                }
            }
        };

        match plan {
            Plan::Join(rx) => settled_result(rx).await,
            Plan::Start { tx, rx, generation } => {
                self.list_fetch.begin();
                let api = Arc::clone(&self.api);
                let inner = Arc::clone(&self.inner);
                let status = self.list_fetch.clone();
                tokio::spawn(async move {
                    let result = api.list().await.map_err(CacheError::from);
                    let outcome = {
                        let mut guard = inner.lock().await;
                        guard.list.inflight = None;
                        match result {
                            Ok(posts) => {
                                let value = Arc::new(posts);
                                guard.list.entry = Some(Entry {
                                    value: Arc::clone(&value),
                                    fetched_at: Instant::now(),
                                    stale: guard.list.generation != generation,
                                });
                                Ok(value)
                            }
                            Err(e) => Err(e),
                        }
                    };
                    match &outcome {
                        Ok(posts) => {
                            debug!(count = posts.len(), "Post collection cached");
                            status.succeed();
                        }
                        Err(e) => {
                            error!(error = %e, "Post collection fetch failed");
                            status.fail(e.clone());
                        }
                    }
                    let _ = tx.send(outcome);
                });
                settled_result(rx).await
            }
        }
    }

    /// A single post, from cache when fresh.
    ///
    /// Non-positive ids are refused before any cache or network activity,
    /// mirroring the UI's `enabled: id > 0` query gate.
    pub async fn post(&self, id: i64) -> Result<Arc<Post>> {
        if id <= 0 {
            return Err(CacheError::InvalidId(id));
        }

        let plan = {
            let mut inner = self.inner.lock().await;
            let slot = inner.singles.entry(id).or_default();
            if let Some(entry) = &slot.entry {
                if entry.is_fresh(self.stale_after) {
                    return Ok(Arc::clone(&entry.value));
                }
            }
            if let Some(tx) = &slot.inflight {
                Plan::Join(tx.subscribe())
            } else {
                let (tx, rx) = broadcast::channel(1);
                slot.inflight = Some(tx.clone());
                Plan::Start {
                    tx,
                    rx,
                    generation: slot.generation,
                }
            }
        };

        match plan {
            Plan::Join(rx) => settled_result(rx).await,
            Plan::Start { tx, rx, generation } => {
                self.single_fetch.begin();
                let api = Arc::clone(&self.api);
                let inner = Arc::clone(&self.inner);
                let status = self.single_fetch.clone();
                tokio::spawn(async move {
                    let result = api.get(id).await.map_err(CacheError::from);
                    let outcome = {
                        let mut guard = inner.lock().await;
                        let slot = guard.singles.entry(id).or_default();
                        slot.inflight = None;
                        match result {
                            Ok(post) => {
                                let value = Arc::new(post);
                                slot.entry = Some(Entry {
                                    value: Arc::clone(&value),
                                    fetched_at: Instant::now(),
                                    stale: slot.generation != generation,
                                });
                                Ok(value)
                            }
                            Err(e) => Err(e),
                        }
                    };
                    match &outcome {
                        Ok(_) => status.succeed(),
                        Err(e) => {
                            error!(id, error = %e, "Post fetch failed");
                            status.fail(e.clone());
                        }
                    }
                    let _ = tx.send(outcome);
                });
                settled_result(rx).await
            }
        }
    }

    // -- Mutations ----------------------------------------------------------

    /// Create a post.  On settle, success or failure, the posts keys are
    /// invalidated so the next read re-fetches.
    pub async fn create(&self, draft: PostDraft) -> Result<MutationOutcome> {
        self.create_op.begin();
        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let status = self.create_op.clone();
        join_settled(tokio::spawn(async move {
            let result = api.create(&draft).await.map_err(CacheError::from);
            inner.lock().await.invalidate_posts();
            match result {
                Ok(post) => {
                    info!(id = post.id, "Create settled");
                    status.succeed();
                    Ok(MutationOutcome::Created(post))
                }
                Err(e) => {
                    error!(error = %e, "Create failed");
                    status.fail(e.clone());
                    Err(e)
                }
            }
        }))
        .await
    }

    /// Replace the post with `id`.  Settle-time invalidation covers the
    /// collection and the post's own detail entry.
    pub async fn update(&self, id: i64, draft: PostDraft) -> Result<MutationOutcome> {
        if id <= 0 {
            return Err(CacheError::InvalidId(id));
        }

        self.update_op.begin();
        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let status = self.update_op.clone();
        join_settled(tokio::spawn(async move {
            let result = api.update(id, &draft).await.map_err(CacheError::from);
            inner.lock().await.invalidate_posts();
            match result {
                Ok(post) => {
                    info!(id, "Update settled");
                    status.succeed();
                    Ok(MutationOutcome::Updated(post))
                }
                Err(e) => {
                    error!(id, error = %e, "Update failed");
                    status.fail(e.clone());
                    Err(e)
                }
            }
        }))
        .await
    }

    /// Delete the post with `id`.  Success means the server accepted the
    /// request; the backing resource is read-only, so the row reappears on
    /// the next collection fetch.
    pub async fn delete(&self, id: i64) -> Result<MutationOutcome> {
        if id <= 0 {
            return Err(CacheError::InvalidId(id));
        }

        self.delete_op.begin();
        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        let status = self.delete_op.clone();
        join_settled(tokio::spawn(async move {
            let result = api.delete(id).await.map_err(CacheError::from);
            inner.lock().await.invalidate_posts();
            match result {
                Ok(()) => {
                    info!(id, "Delete settled");
                    status.succeed();
                    Ok(MutationOutcome::Deleted { id })
                }
                Err(e) => {
                    error!(id, error = %e, "Delete failed");
                    status.fail(e.clone());
                    Err(e)
                }
            }
        }))
        .await
    }

    // -- Explicit cache surface ----------------------------------------------

    /// The cached value under `key`, fresh or stale, without fetching.
    pub async fn peek(&self, key: QueryKey) -> Option<CachedValue> {
        let inner = self.inner.lock().await;
        match key {
            QueryKey::Posts => inner
                .list
                .entry
                .as_ref()
                .map(|e| CachedValue::List(Arc::clone(&e.value))),
            QueryKey::Post(id) => inner
                .singles
                .get(&id)
                .and_then(|slot| slot.entry.as_ref())
                .map(|e| CachedValue::Single(Arc::clone(&e.value))),
        }
    }

    /// Seed `key` with a fresh value, as if it had just been fetched.
    ///
    /// A value whose shape does not match the key is ignored.
    pub async fn prime(&self, key: QueryKey, value: CachedValue) {
        let mut inner = self.inner.lock().await;
        match (key, value) {
            (QueryKey::Posts, CachedValue::List(posts)) => {
                inner.list.entry = Some(Entry::fresh(posts));
            }
            (QueryKey::Post(id), CachedValue::Single(post)) => {
                inner.singles.entry(id).or_default().entry = Some(Entry::fresh(post));
            }
            (key, _) => {
                warn!(key = %key, "Primed value does not match key shape, ignoring");
            }
        }
    }

    /// Mark `key` stale so the next read re-fetches.  Stale data stays
    /// available for display until replaced.  The collection key is a
    /// prefix of every single-post key, so invalidating it also
    /// invalidates all single-post entries.
    pub async fn invalidate(&self, key: QueryKey) {
        let mut inner = self.inner.lock().await;
        match key {
            QueryKey::Posts => inner.invalidate_posts(),
            QueryKey::Post(id) => {
                if let Some(slot) = inner.singles.get_mut(&id) {
                    slot.invalidate();
                }
            }
        }
        debug!(key = %key, "Invalidated");
    }

    // -- Status -------------------------------------------------------------

    pub fn list_status(&self) -> &StatusCell {
        &self.list_fetch
    }

    pub fn single_status(&self) -> &StatusCell {
        &self.single_fetch
    }

    pub fn create_status(&self) -> &StatusCell {
        &self.create_op
    }

    pub fn update_status(&self) -> &StatusCell {
        &self.update_op
    }

    pub fn delete_status(&self) -> &StatusCell {
        &self.delete_op
    }
}

/// Wait for the in-flight fetch owning `rx` to settle and share its result.
async fn settled_result<T: Clone>(mut rx: broadcast::Receiver<Result<T>>) -> Result<T> {
    match rx.recv().await {
        Ok(outcome) => outcome,
        // Only reachable if the fetch task was torn down before settling.
        Err(_) => Err(CacheError::Api(ApiError::Network(
            "query task dropped before settling".to_string(),
        ))),
    }
}

/// Await a mutation task.  The task owns the settle logic, so invalidation
/// and status updates run even if this caller is dropped mid-flight.
async fn join_settled<T>(handle: tokio::task::JoinHandle<Result<T>>) -> Result<T> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(CacheError::Api(ApiError::Network(format!(
            "mutation task failed: {e}"
        )))),
    }
}
