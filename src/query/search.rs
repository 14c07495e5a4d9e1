//! Free-text matching.

use crate::content::Post;

/// Normalized search needle, or `None` for a blank query.
///
/// Blank queries match nothing rather than everything.
pub fn needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Case-insensitive substring match on title, subtitle, or any tag.
///
/// `needle` must already be lower-cased (see [`needle`]).
pub fn matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.subtitle.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
