//! Shared index with cached JSON renderings.
//!
//! The export step and every server request read the same two documents
//! (`pages.json` and `tags.json`). They are rendered once on first use and
//! reused afterwards. The index itself is immutable, so the cache never needs
//! invalidation.

use parking_lot::RwLock;
use serde::Serialize;

use crate::query::PostQuery;

#[derive(Debug, Clone, Copy)]
enum Slot {
    Pages = 0,
    Tags = 1,
}

/// Cached JSON strings, indexed by [`Slot`].
#[derive(Debug, Default)]
struct JsonCache([Option<String>; 2]);

/// Thread-safe owner of the loaded index.
///
/// Queries go straight to the [`PostQuery`], which needs no locking. Only the
/// JSON cache sits behind an `RwLock`.
#[derive(Debug, Default)]
pub struct IndexStore {
    query: PostQuery,
    json_cache: RwLock<JsonCache>,
}

impl IndexStore {
    pub fn new(query: PostQuery) -> Self {
        Self {
            query,
            json_cache: RwLock::default(),
        }
    }

    pub fn query(&self) -> &PostQuery {
        &self.query
    }

    /// All annotated posts, newest first.
    pub fn pages_to_json(&self) -> String {
        self.cached(Slot::Pages, |query| to_json(&query.all_posts(), "[]"))
    }

    /// Tag counts, most used first.
    pub fn tags_to_json(&self) -> String {
        self.cached(Slot::Tags, |query| to_json(&query.all_tags(), "[]"))
    }

    fn cached(&self, slot: Slot, render: impl FnOnce(&PostQuery) -> String) -> String {
        // Fast path: read lock only
        if let Some(json) = &self.json_cache.read().0[slot as usize] {
            return json.clone();
        }

        let mut cache = self.json_cache.write();
        // Double-check after acquiring write lock
        if let Some(json) = &cache.0[slot as usize] {
            return json.clone();
        }

        let json = render(&self.query);
        cache.0[slot as usize] = Some(json.clone());
        json
    }
}

/// Pretty JSON, or `fallback` if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRegistry, record};
    use serde_json::Value;

    fn store() -> IndexStore {
        let registry = ContentRegistry::from_records(
            vec![record("1", "2025-01-07T09:00:00", &["spring", "AOP"], "sprout1")],
            vec![record("1", "2025-03-02T21:00:00", &["rust"], "memory-rust")],
            vec![record("1", "2024-12-31", &["회고", "spring"], "2024-retro")],
        )
        .unwrap();
        IndexStore::new(PostQuery::new(registry))
    }

    #[test]
    fn test_pages_to_json_newest_first() {
        let json: Value = serde_json::from_str(&store().pages_to_json()).unwrap();
        let pages = json.as_array().unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0]["slug"], "memory-rust");
        assert_eq!(pages[0]["type"], "til");
        assert_eq!(pages[0]["href"], "/til/memory-rust");
        assert_eq!(pages[2]["slug"], "2024-retro");
    }

    #[test]
    fn test_tags_to_json_counts() {
        let json: Value = serde_json::from_str(&store().tags_to_json()).unwrap();
        let tags = json.as_array().unwrap();

        assert_eq!(tags[0]["name"], "spring");
        assert_eq!(tags[0]["count"], 2);
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_json_is_cached() {
        let store = store();
        assert!(store.json_cache.read().0[Slot::Tags as usize].is_none());

        let first = store.tags_to_json();
        assert!(store.json_cache.read().0[Slot::Tags as usize].is_some());
        assert!(store.json_cache.read().0[Slot::Pages as usize].is_none());
        assert_eq!(first, store.tags_to_json());
    }

    #[test]
    fn test_empty_store() {
        let store = IndexStore::default();
        assert_eq!(store.pages_to_json(), "[]");
        assert_eq!(store.tags_to_json(), "[]");
    }
}
