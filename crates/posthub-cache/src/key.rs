//! Stable identity for cached queries.

use std::fmt;

/// Identity of a cached query.
///
/// `Posts` names the full collection, `Post(id)` a single lookup.  Every
/// cache operation (read-through, peek, prime, invalidate) addresses one of
/// these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Posts,
    Post(i64),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Posts => write!(f, "posts"),
            QueryKey::Post(id) => write!(f, "posts/{id}"),
        }
    }
}
