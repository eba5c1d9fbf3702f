//! Minted identifiers for posts created in this session.
//!
//! The remote resource never persists writes, so created posts need ids
//! fabricated locally.  Ids are millisecond UTC timestamps clamped to be
//! strictly increasing, so two creations inside the same millisecond still
//! receive distinct ids, and minted ids never collide with the resource's
//! small built-in id range.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Mints session-unique ids for synthesized posts.
#[derive(Debug, Default)]
pub struct IdMint {
    last: AtomicI64,
}

impl IdMint {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next id: the current timestamp, or one past the previously minted id
    /// when the clock has not advanced.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let id = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, id, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return id,
                Err(actual) => last = actual,
            }
        }
    }
}
