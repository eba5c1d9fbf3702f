//! Editor input validation.
//!
//! Validation operates on canonical values: the title is trimmed and the
//! body has its markup stripped before any rule is checked, so a body that
//! is nothing but tags fails the required check and a title padded with
//! spaces is not over the limit.

use serde::Serialize;
use thiserror::Error;

use crate::constants::{BODY_MAX_CHARS, TITLE_MAX_CHARS};
use crate::markup::strip_markup;
use crate::types::PostDraft;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The form field a validation error refers to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Body,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Body => write!(f, "body"),
        }
    }
}

/// A single failed validation rule, with the message shown next to the field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Which field failed.
    pub field: Field,
    /// Human-readable message for the form.
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Validate raw editor input and produce a canonical [`PostDraft`].
///
/// `title` is trimmed; `body_markup` is stripped of markup and trimmed.
/// Returns every failed rule (at most one per field, title first) so the
/// form can annotate both fields in a single pass.  A draft that passes
/// never needs further cleanup before submission.
pub fn validate_draft(title: &str, body_markup: &str) -> Result<PostDraft, Vec<ValidationError>> {
    let title = title.trim();
    let body = strip_markup(body_markup);
    let body = body.trim();

    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push(ValidationError::new(Field::Title, "Title is required"));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(ValidationError::new(
            Field::Title,
            "Title must be less than 200 characters",
        ));
    }

    if body.is_empty() {
        errors.push(ValidationError::new(Field::Body, "Content is required"));
    } else if body.chars().count() > BODY_MAX_CHARS {
        errors.push(ValidationError::new(
            Field::Body,
            "Content must be less than 5000 characters",
        ));
    }

    if errors.is_empty() {
        Ok(PostDraft {
            title: title.to_string(),
            body: body.to_string(),
        })
    } else {
        Err(errors)
    }
}
