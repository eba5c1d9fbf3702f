//! HTTP client for the remote posts resource.
//!
//! The resource follows the JSONPlaceholder contract: reads return real
//! data, writes are accepted and echoed back but never persisted.  Mutation
//! results visible to this session are therefore synthesized locally (echo
//! bodies are discarded), and a delete "succeeds" even though the row will
//! reappear on the next collection fetch.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use posthub_shared::constants::OWNER_USER_ID;
use posthub_shared::{Post, PostDraft};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::ids::IdMint;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Operations on the remote posts resource.
///
/// Implemented over HTTP by [`PostsClient`]; tests substitute scripted
/// fakes so caching and view-model behaviour can be driven without a
/// network.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch the full post collection, owner-normalized.
    async fn list(&self) -> Result<Vec<Post>>;

    /// Fetch a single post by id.  An id unknown to the server yields
    /// [`ApiError::NotFound`].
    async fn get(&self, id: i64) -> Result<Post>;

    /// Create a post from a validated draft.  Returns the synthesized post
    /// this session will see.
    async fn create(&self, draft: &PostDraft) -> Result<Post>;

    /// Replace the post with `id`.  Returns the synthesized updated post.
    async fn update(&self, id: i64, draft: &PostDraft) -> Result<Post>;

    /// Delete the post with `id`.  Success means the server accepted the
    /// request, not that the row is gone remotely.
    async fn delete(&self, id: i64) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Request body for create and update calls.  The owner is always sent so
/// the simulated write carries the same shape a real backend would expect.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    title: &'a str,
    body: &'a str,
    user_id: i64,
}

/// [`PostsApi`] implementation backed by reqwest.
pub struct PostsClient {
    http: reqwest::Client,
    base_url: String,
    ids: IdMint,
}

impl PostsClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ids: IdMint::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success status, treating every 2xx as success.
fn check_status(status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Remote {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl PostsApi for PostsClient {
    async fn list(&self) -> Result<Vec<Post>> {
        let resp = self
            .http
            .get(self.url("/posts"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(resp.status())?;

        let mut posts: Vec<Post> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        // The resource spreads posts across many authors; this application
        // presents a single demo owner.
        for post in &mut posts {
            post.user_id = OWNER_USER_ID;
        }

        debug!(count = posts.len(), "Fetched post collection");
        Ok(posts)
    }

    async fn get(&self, id: i64) -> Result<Post> {
        let resp = self
            .http
            .get(self.url(&format!("/posts/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        check_status(resp.status())?;

        let mut post: Post = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        post.user_id = OWNER_USER_ID;

        debug!(id = post.id, "Fetched post");
        Ok(post)
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post> {
        let resp = self
            .http
            .post(self.url("/posts"))
            .json(&WriteBody {
                id: None,
                title: &draft.title,
                body: &draft.body,
                user_id: OWNER_USER_ID,
            })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(resp.status())?;

        // The echo body always carries the same placeholder id, so it is
        // discarded in favour of a locally minted one.
        let post = Post {
            id: self.ids.next(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            user_id: OWNER_USER_ID,
        };
        info!(id = post.id, "Created post");
        Ok(post)
    }

    async fn update(&self, id: i64, draft: &PostDraft) -> Result<Post> {
        let resp = self
            .http
            .put(self.url(&format!("/posts/{id}")))
            .json(&WriteBody {
                id: Some(id),
                title: &draft.title,
                body: &draft.body,
                user_id: OWNER_USER_ID,
            })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(resp.status())?;

        let post = Post {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
            user_id: OWNER_USER_ID,
        };
        info!(id, "Updated post");
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/posts/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(resp.status())?;

        info!(id, "Deleted post");
        Ok(())
    }
}
