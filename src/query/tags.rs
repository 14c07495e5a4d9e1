//! Tag aggregation.

use crate::content::{Post, TagCount};
use rustc_hash::FxHashMap;

/// Count tag occurrences over `posts`, most used first.
///
/// Tags are compared as exact strings. Ties keep the order in which tags were
/// first encountered.
pub fn count_tags<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<TagCount> {
    let mut slots: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut counts: Vec<TagCount> = Vec::new();

    for post in posts {
        for tag in &post.tags {
            let slot = *slots.entry(tag.as_str()).or_insert_with(|| {
                counts.push(TagCount {
                    name: tag.clone(),
                    count: 0,
                });
                counts.len() - 1
            });
            counts[slot].count += 1;
        }
    }

    // Stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRegistry, record};

    fn registry() -> ContentRegistry {
        ContentRegistry::from_records(
            vec![
                record("1", "2025-06-06", &["spring", "sprout", "reflection"], "sprout1"),
                record("2", "2025-06-18", &["spring", "sprout", "DI"], "sprout2"),
                record("3", "2026-02-13", &["jinx", "apt"], "apt"),
            ],
            vec![
                record("0", "2025-08-25", &["jinx", "CodeRabbit"], "coderabbit"),
                record("1", "2025-10-24", &["jinx", "ddl"], "user-review"),
            ],
            vec![record("1", "2025-09-25", &["jinx", "database"], "jinx")],
        )
        .unwrap()
    }

    #[test]
    fn test_counts_across_collections() {
        let registry = registry();
        let tags = count_tags(registry.posts());

        let count = |name: &str| tags.iter().find(|t| t.name == name).map(|t| t.count);
        assert_eq!(count("jinx"), Some(4));
        assert_eq!(count("spring"), Some(2));
        assert_eq!(count("apt"), Some(1));
        assert_eq!(count("missing"), None);
    }

    #[test]
    fn test_each_tag_listed_once() {
        let registry = registry();
        let tags = count_tags(registry.posts());

        let mut names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
        assert_eq!(before, 9);
    }

    #[test]
    fn test_sorted_by_count_with_stable_ties() {
        let registry = registry();
        let tags = count_tags(registry.posts());

        assert!(tags.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(tags[0].name, "jinx");

        // Union order is TIL, article, reflection: "CodeRabbit" is seen before "apt"
        let singles: Vec<_> = tags
            .iter()
            .filter(|t| t.count == 1)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            singles,
            ["CodeRabbit", "ddl", "reflection", "DI", "apt", "database"]
        );
    }

    #[test]
    fn test_case_sensitive_names() {
        let registry = ContentRegistry::from_records(
            vec![record("1", "2025-06-06", &["AOP"], "a")],
            vec![record("1", "2025-06-06", &["aop"], "b")],
            vec![],
        )
        .unwrap();

        let tags = count_tags(registry.posts());
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|t| t.count == 1));
    }

    #[test]
    fn test_empty() {
        let registry = ContentRegistry::default();
        assert!(count_tags(registry.posts()).is_empty());
    }
}
