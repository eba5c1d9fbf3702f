//! Create / edit form state backing the admin dialog.
//!
//! The form holds raw editor input.  Submission validates and canonicalizes
//! it, runs the matching mutation, and reports one of three outcomes:
//! invalid input (field messages set, nothing sent), a settled save, or a
//! failed save (input kept so the user can retry).

use tracing::error;

use posthub_cache::{CacheError, MutationOutcome, QueryCache};
use posthub_shared::{validate_draft, Field, Post, ValidationError};

/// Which mutation [`PostForm::submit`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the post with this id.
    Edit(i64),
}

/// Messages shown under the title and body inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    fn from_validation(errors: &[ValidationError]) -> Self {
        let mut out = Self::default();
        for err in errors {
            let slot = match err.field {
                Field::Title => &mut out.title,
                Field::Body => &mut out.body,
            };
            if slot.is_none() {
                *slot = Some(err.message.clone());
            }
        }
        out
    }
}

/// What a [`PostForm::submit`] call produced.
#[derive(Debug)]
pub enum Submission {
    /// Validation failed; field messages were set and nothing was sent.
    Invalid,
    /// The mutation settled successfully and the inputs were cleared.
    Saved(MutationOutcome),
    /// The mutation failed; inputs were kept for a retry.
    Failed(CacheError),
}

/// State of the create / edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub mode: FormMode,
    /// Raw title input.
    pub title: String,
    /// Raw body input; may contain editor markup.
    pub body: String,
    pub errors: FieldErrors,
}

impl PostForm {
    /// An empty form that will create a new post.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            body: String::new(),
            errors: FieldErrors::default(),
        }
    }

    /// A form pre-filled from `post` that will update it.
    pub fn edit(post: &Post) -> Self {
        Self {
            mode: FormMode::Edit(post.id),
            title: post.title.clone(),
            body: post.body.clone(),
            errors: FieldErrors::default(),
        }
    }

    /// Dialog heading for the current mode.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Post",
            FormMode::Edit(_) => "Edit Post",
        }
    }

    /// Validate the inputs and run the mutation for the current mode.
    pub async fn submit(&mut self, cache: &QueryCache) -> Submission {
        let draft = match validate_draft(&self.title, &self.body) {
            Ok(draft) => draft,
            Err(errors) => {
                self.errors = FieldErrors::from_validation(&errors);
                return Submission::Invalid;
            }
        };
        self.errors = FieldErrors::default();

        let result = match self.mode {
            FormMode::Create => cache.create(draft).await,
            FormMode::Edit(id) => cache.update(id, draft).await,
        };

        match result {
            Ok(outcome) => {
                self.title.clear();
                self.body.clear();
                Submission::Saved(outcome)
            }
            Err(err) => {
                error!(error = %err, "Form submission failed");
                self.errors.body = Some(
                    match self.mode {
                        FormMode::Create => "Failed to create post. Please try again.",
                        FormMode::Edit(_) => "Failed to update post. Please try again.",
                    }
                    .to_string(),
                );
                Submission::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::Ordering;

    use crate::testing::{cache_over, post, FakeApi};

    #[tokio::test]
    async fn test_invalid_input_sets_messages_and_sends_nothing() {
        let api = FakeApi::with_posts(vec![]);
        let cache = cache_over(api.clone());

        let mut form = PostForm::create();
        form.body = "<p>  </p>".to_string();

        let outcome = form.submit(&cache).await;
        assert!(matches!(outcome, Submission::Invalid));
        assert_eq!(form.errors.title.as_deref(), Some("Title is required"));
        assert_eq!(form.errors.body.as_deref(), Some("Content is required"));
        assert_eq!(api.create_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_create_submits_canonical_draft() {
        let api = FakeApi::with_posts(vec![]);
        let cache = cache_over(api.clone());

        let mut form = PostForm::create();
        form.title = "  Hello  ".to_string();
        form.body = "<p>World &amp; beyond</p>".to_string();

        match form.submit(&cache).await {
            Submission::Saved(MutationOutcome::Created(created)) => {
                assert_eq!(created.title, "Hello");
                assert_eq!(created.body, "World & beyond");
            }
            other => panic!("expected Saved(Created), got {other:?}"),
        }

        // Cleared for the next use.
        assert!(form.title.is_empty());
        assert!(form.body.is_empty());
        assert!(form.errors.is_empty());
    }

    #[tokio::test]
    async fn test_edit_submits_update_for_the_same_id() {
        let target = post(7, "Old title", "Old body");
        let api = FakeApi::with_posts(vec![target.clone()]);
        let cache = cache_over(api.clone());

        let mut form = PostForm::edit(&target);
        assert_eq!(form.title, "Old title");
        form.title = "New title".to_string();

        match form.submit(&cache).await {
            Submission::Saved(MutationOutcome::Updated(updated)) => {
                assert_eq!(updated.id, 7);
                assert_eq!(updated.title, "New title");
            }
            other => panic!("expected Saved(Updated), got {other:?}"),
        }
        assert_eq!(api.update_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_input() {
        let api = FakeApi::with_posts(vec![]);
        api.fail_writes.store(true, Ordering::Relaxed);
        let cache = cache_over(api.clone());

        let mut form = PostForm::create();
        form.title = "Title".to_string();
        form.body = "Body".to_string();

        let outcome = form.submit(&cache).await;
        assert!(matches!(outcome, Submission::Failed(_)));
        assert_eq!(form.title, "Title");
        assert_eq!(form.body, "Body");
        assert_eq!(
            form.errors.body.as_deref(),
            Some("Failed to create post. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_failed_update_has_its_own_message() {
        let target = post(3, "t", "b");
        let api = FakeApi::with_posts(vec![target.clone()]);
        api.fail_writes.store(true, Ordering::Relaxed);
        let cache = cache_over(api.clone());

        let mut form = PostForm::edit(&target);
        form.submit(&cache).await;
        assert_eq!(
            form.errors.body.as_deref(),
            Some("Failed to update post. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_valid_submit_clears_previous_messages() {
        let api = FakeApi::with_posts(vec![]);
        let cache = cache_over(api.clone());

        let mut form = PostForm::create();
        form.submit(&cache).await;
        assert!(!form.errors.is_empty());

        form.title = "Title".to_string();
        form.body = "Body".to_string();
        let outcome = form.submit(&cache).await;
        assert!(matches!(outcome, Submission::Saved(_)));
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_headings() {
        assert_eq!(PostForm::create().heading(), "Create New Post");
        assert_eq!(PostForm::edit(&post(1, "t", "b")).heading(), "Edit Post");
    }
}
