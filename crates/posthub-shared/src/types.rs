//! Domain model structs shared by every crate in the workspace.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer, and decoded from the remote resource's JSON,
//! which uses camelCase field names.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A blog post as exposed by the remote resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique post identifier.  Remote posts use small ids (1..=100); posts
    /// created in this session carry minted millisecond-scale ids.
    pub id: i64,
    /// Post title, canonical form (trimmed).
    pub title: String,
    /// Post body as plain text, canonical form (markup stripped, trimmed).
    pub body: String,
    /// Owning user.  Serialized as `userId` on the wire; always the fixed
    /// demo owner after normalization.
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// PostDraft
// ---------------------------------------------------------------------------

/// Validated editor input for creating or updating a post.
///
/// Both fields hold canonical values: the title is trimmed and the body has
/// had its markup stripped.  Obtain one through
/// [`validate_draft`](crate::validation::validate_draft).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    /// Post title (trimmed, non-empty).
    pub title: String,
    /// Plain-text body (stripped, trimmed, non-empty).
    pub body: String,
}
