//! Presentation helpers over query results.
//!
//! Pure shaping functions used by the CLI output and the query server: day and
//! year sections, the incremental loading window, tag cloud weights and note
//! excerpts. None of them touch the registry.

mod cloud;
mod group;
mod window;

pub use cloud::{CloudTag, TagWeight, tag_cloud};
pub use group::{DayGroup, YearSection, group_by_day, group_by_year};
pub use window::{POSTS_PER_LOAD, Window};

use std::borrow::Cow;

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}
