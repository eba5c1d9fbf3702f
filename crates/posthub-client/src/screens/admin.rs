//! Admin dashboard: the post table, the create / edit dialog, and the
//! local effect of each settled mutation.
//!
//! The screen keeps a working copy of the collection and splices settled
//! mutations into it, because the remote accepts writes without persisting
//! them.  A settled re-fetch replaces the working copy wholesale, so rows
//! deleted or created locally reappear or vanish once the collection
//! refreshes; the working copy is honest about what the server would show,
//! not about what this session did.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use posthub_cache::{MutationOutcome, QueryCache, Result};
use posthub_shared::constants::POSTS_PER_PAGE;
use posthub_shared::Post;

use crate::filter::filter_posts;
use crate::form::{PostForm, Submission};
use crate::pagination::Pager;

/// What the admin table renders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSnapshot {
    /// Rows for the current page.
    pub rows: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
    /// Page buttons to show.
    pub page_numbers: Vec<usize>,
    /// Rows matching the search, across all pages.
    pub matching: usize,
    /// Progress toasts for in-flight mutations, in display order.
    pub busy: Vec<&'static str>,
    /// True while a create is in flight; the create button is disabled.
    pub creating: bool,
}

/// State behind the admin dashboard.
pub struct AdminScreen {
    cache: Arc<QueryCache>,
    /// Working copy of the collection, carrying local splices until the
    /// next fetched list replaces it.
    posts: Vec<Post>,
    /// The fetched list the working copy was last seeded from.
    synced: Option<Arc<Vec<Post>>>,
    search: String,
    pager: Pager,
    form: Option<PostForm>,
    edit_target: Option<i64>,
}

impl AdminScreen {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            posts: Vec::new(),
            synced: None,
            search: String::new(),
            pager: Pager::new(POSTS_PER_PAGE),
            form: None,
            edit_target: None,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
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

    /// The open dialog, if any.
    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open dialog's inputs.
    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        self.form.as_mut()
    }

    pub fn edit_target(&self) -> Option<i64> {
        self.edit_target
    }

    /// Fetch (or reuse) the collection, adopt it if it changed, and
    /// project the current page.
    pub async fn load(&mut self) -> Result<AdminSnapshot> {
        let fetched = self.cache.posts().await?;
        let changed = match &self.synced {
            Some(seen) => !Arc::ptr_eq(seen, &fetched),
            None => true,
        };
        if changed {
            // Wholesale replacement: local splices do not survive a
            // settled fetch, the remote never persisted them.
            self.posts = Vec::clone(&fetched);
            self.synced = Some(fetched);
            debug!(count = self.posts.len(), "Adopted fetched collection");
        }
        Ok(self.project())
    }

    /// Project the working copy as it stands, without fetching.
    pub fn snapshot(&mut self) -> AdminSnapshot {
        self.project()
    }

    fn project(&mut self) -> AdminSnapshot {
        let filtered = filter_posts(&self.posts, &self.search);
        self.pager.set_total(filtered.len());
        let rows = self
            .pager
            .slice(&filtered)
            .iter()
            .map(|&p| p.clone())
            .collect();

        AdminSnapshot {
            rows,
            page: self.pager.current(),
            total_pages: self.pager.total_pages(),
            page_numbers: self.pager.window(),
            matching: filtered.len(),
            busy: self.busy_labels(),
            creating: self.cache.create_status().is_pending(),
        }
    }

    /// Progress toasts for in-flight mutations, in display order.
    pub fn busy_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.cache.create_status().is_pending() {
            labels.push("Creating post...");
        }
        if self.cache.update_status().is_pending() {
            labels.push("Updating post...");
        }
        if self.cache.delete_status().is_pending() {
            labels.push("Deleting post...");
        }
        labels
    }

    /// Open the dialog on an empty create form.
    pub fn open_create(&mut self) {
        self.edit_target = None;
        self.form = Some(PostForm::create());
    }

    /// Fetch `id` through the single-post query and open the dialog on it.
    pub async fn open_edit(&mut self, id: i64) -> Result<()> {
        let post = self.cache.post(id).await?;
        self.edit_target = Some(id);
        self.form = Some(PostForm::edit(&post));
        Ok(())
    }

    /// Close the dialog, discarding its inputs.
    pub fn close_form(&mut self) {
        self.form = None;
        self.edit_target = None;
    }

    /// Submit the open dialog.  Returns `None` when no dialog is open.
    ///
    /// A saved submission closes the dialog and splices the outcome into
    /// the working copy; invalid or failed submissions leave it open.
    pub async fn submit_form(&mut self) -> Option<Submission> {
        let form = self.form.as_mut()?;
        let submission = form.submit(&self.cache).await;
        if let Submission::Saved(outcome) = &submission {
            let outcome = outcome.clone();
            self.close_form();
            self.apply(outcome);
        }
        Some(submission)
    }

    /// Delete `id` remotely, then hide its row locally.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        if self.cache.delete_status().is_pending() {
            warn!(id, "Delete already in flight, ignoring");
            return Ok(());
        }
        match self.cache.delete(id).await {
            Ok(outcome) => {
                self.apply(outcome);
                Ok(())
            }
            Err(err) => {
                error!(id, error = %err, "Delete failed");
                Err(err)
            }
        }
    }

    /// Splice a settled mutation into the working copy.
    pub fn apply(&mut self, outcome: MutationOutcome) {
        match outcome {
            MutationOutcome::Created(post) => {
                // The first row stays put; new rows land right under it.
                let at = 1.min(self.posts.len());
                self.posts.insert(at, post);
            }
            MutationOutcome::Updated(post) => {
                if let Some(row) = self.posts.iter_mut().find(|p| p.id == post.id) {
                    *row = post;
                }
            }
            MutationOutcome::Deleted { id } => {
                self.posts.retain(|p| p.id != id);
                if self.edit_target == Some(id) {
                    self.close_form();
                }
                self.pager.set_total(self.posts.len());
            }
        }
    }
}
