//! # posthub-client
//!
//! View-model layer for the PostHub blog reader and admin dashboard.
//! Screens project the cached post collection into renderable snapshots;
//! all remote traffic flows through [`posthub_cache::QueryCache`], so the
//! shell never talks to the network directly.

pub mod filter;
pub mod form;
pub mod pagination;
pub mod screens;
pub mod state;

#[cfg(test)]
mod testing;

use tracing_subscriber::{fmt, EnvFilter};

pub use crate::form::{FieldErrors, FormMode, PostForm, Submission};
pub use crate::pagination::Pager;
pub use crate::screens::admin::{AdminScreen, AdminSnapshot};
pub use crate::screens::browse::{BrowseScreen, BrowseSnapshot, PostCard, ViewMode};
pub use crate::screens::detail::{DetailOutcome, DetailScreen, DetailView};
pub use crate::state::App;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.  Call once at startup, before
/// building an [`App`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("posthub_client=debug,posthub_cache=debug,posthub_api=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!(
        app = posthub_shared::constants::APP_NAME,
        "Logging initialised"
    );
}
