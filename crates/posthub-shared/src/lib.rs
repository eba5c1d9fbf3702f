//! # posthub-shared
//!
//! Domain types and pure helpers shared by every crate in the workspace:
//! the `Post` model, editor input validation, markup stripping, and the
//! application constants.

pub mod constants;
pub mod markup;
pub mod types;
pub mod validation;

pub use markup::strip_markup;
pub use types::{Post, PostDraft};
pub use validation::{validate_draft, Field, ValidationError};
