/// The single user every post is attributed to.  The remote resource carries
/// posts for many users; this application presents them all as belonging to
/// one demo account, so every fetched or synthesized post is normalized to
/// this owner.
pub const OWNER_USER_ID: i64 = 1;

/// Application name shown by the shell.
pub const APP_NAME: &str = "PostHub";

/// Base URL of the remote posts resource.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// How long a cached query result stays fresh (5 minutes).
pub const DEFAULT_STALE_SECS: u64 = 300;

/// Maximum title length in characters (after trimming).
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum body length in characters (after markup stripping and trimming).
pub const BODY_MAX_CHARS: usize = 5000;

/// Posts shown per page in the list views.
pub const POSTS_PER_PAGE: usize = 10;

/// Number of page buttons shown in the pagination strip.
pub const PAGE_WINDOW: usize = 5;

/// Characters of body text counted as one minute of reading.
pub const READ_CHARS_PER_MINUTE: usize = 200;

/// Reading time shown when the body is empty.
pub const FALLBACK_READ_MINUTES: u32 = 3;

/// Placeholder engagement counts for the detail view.  The remote resource
/// has no engagement data, so the reader shows fixed baselines.
pub const BASELINE_LIKES: u32 = 50;
pub const BASELINE_COMMENTS: u32 = 10;
pub const BASELINE_VIEWS: u32 = 200;

/// Display categories.  A post's category is derived from its id.
pub const CATEGORIES: [&str; 6] = [
    "Technology",
    "Design",
    "Business",
    "Health",
    "Travel",
    "Food",
];
