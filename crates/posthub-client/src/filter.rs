//! Case-insensitive search over the post collection.

use posthub_shared::Post;

/// Posts whose title or body contains `term`, ignoring case.
///
/// An empty term matches every post, so the screens can feed the search
/// box straight through.  Matching is plain substring search; no ranking.
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.body.to_lowercase().contains(&needle)
        })
        .collect()
}
