//! Read-only queries over the content collections.
//!
//! [`PostQuery`] owns the loaded [`ContentRegistry`] and answers every lookup
//! with freshly built, annotated results. Nothing here mutates the registry, so
//! a single instance can be shared across threads as-is.
//!
//! | Query              | Input       | Ordering          |
//! |--------------------|-------------|-------------------|
//! | `all_tags`         | -           | count, descending |
//! | `posts_by_tag`     | exact tag   | date, newest      |
//! | `search_posts`     | free text   | date, newest      |
//! | `list`             | collection  | date, newest      |
//! | `find`/`neighbors` | slug        | -                 |
//!
//! Posts sharing a timestamp keep union order (TIL, article, reflection, each
//! in registry order).

mod search;
mod tags;

use crate::content::{AnnotatedPost, ContentRegistry, MiscNote, Post, PostKind, TagCount};
use serde::Serialize;

pub use tags::count_tags;

/// A post and its adjacent posts within the same collection.
#[derive(Debug, Clone, Serialize)]
pub struct Neighbors {
    pub post: AnnotatedPost,
    /// The next more recent post, if any.
    pub newer: Option<AnnotatedPost>,
    /// The next older post, if any.
    pub older: Option<AnnotatedPost>,
}

#[derive(Debug, Default)]
pub struct PostQuery {
    registry: ContentRegistry,
}

impl PostQuery {
    pub fn new(registry: ContentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Every tag in use, with the number of posts carrying it.
    pub fn all_tags(&self) -> Vec<TagCount> {
        count_tags(self.registry.posts())
    }

    /// Posts carrying exactly `tag` (case-sensitive, untrimmed).
    pub fn posts_by_tag(&self, tag: &str) -> Vec<AnnotatedPost> {
        newest_first(self.registry.posts().filter(|post| post.has_tag(tag)))
    }

    /// Posts whose title, subtitle or tags contain `query`, ignoring case.
    ///
    /// A blank query returns nothing.
    pub fn search_posts(&self, query: &str) -> Vec<AnnotatedPost> {
        let Some(needle) = search::needle(query) else {
            return Vec::new();
        };
        newest_first(
            self.registry
                .posts()
                .filter(|post| search::matches(post, &needle)),
        )
    }

    /// One collection, newest first.
    pub fn list(&self, kind: PostKind) -> Vec<AnnotatedPost> {
        newest_first(self.registry.collection(kind))
    }

    /// All posts, newest first.
    pub fn all_posts(&self) -> Vec<AnnotatedPost> {
        newest_first(self.registry.posts())
    }

    /// The post with `slug` in one collection, without its neighbors.
    pub fn find(&self, kind: PostKind, slug: &str) -> Option<AnnotatedPost> {
        self.registry
            .collection(kind)
            .iter()
            .find(|post| post.slug == slug)
            .map(Post::annotate)
    }

    /// Locate `slug` in its collection's newest-first order, with the posts
    /// on either side.
    pub fn neighbors(&self, kind: PostKind, slug: &str) -> Option<Neighbors> {
        let sorted = sorted_newest_first(self.registry.collection(kind));
        let index = sorted.iter().position(|post| post.slug == slug)?;

        Some(Neighbors {
            post: sorted[index].annotate(),
            newer: index
                .checked_sub(1)
                .and_then(|i| sorted.get(i))
                .map(|post| post.annotate()),
            older: sorted.get(index + 1).map(|post| post.annotate()),
        })
    }

    /// Misc notes, newest first.
    pub fn misc_feed(&self) -> Vec<MiscNote> {
        let mut notes = self.registry.misc().to_vec();
        notes.sort_by(|a, b| b.date.cmp(&a.date));
        notes
    }
}

fn sorted_newest_first<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<&'a Post> {
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    // `sort_by` is stable, ties keep input order
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn newest_first<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<AnnotatedPost> {
    sorted_newest_first(posts)
        .into_iter()
        .map(Post::annotate)
        .collect()
}
