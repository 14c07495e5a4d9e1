//! Tag cloud weighting.

use crate::content::TagCount;
use serde::Serialize;

/// Relative size tier of a tag in the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagWeight {
    S,
    M,
    L,
    Xl,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloudTag {
    pub name: String,
    pub count: usize,
    pub href: String,
    pub weight: TagWeight,
}

/// Path of a tag page, with the name percent-encoded.
pub fn tag_href(name: &str) -> String {
    format!("/tags/{}", urlencoding::encode(name))
}

/// Weight the first `max_tags` tags against the min/max count among them.
///
/// `tags` is expected most-used first (as returned by the tag index).
pub fn tag_cloud(tags: &[TagCount], max_tags: usize) -> Vec<CloudTag> {
    let shown = &tags[..max_tags.min(tags.len())];
    let max = shown.iter().map(|t| t.count).max().unwrap_or(0);
    let min = shown.iter().map(|t| t.count).min().unwrap_or(0);

    shown
        .iter()
        .map(|tag| CloudTag {
            name: tag.name.clone(),
            count: tag.count,
            href: tag_href(&tag.name),
            weight: weight(tag.count, min, max),
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)] // Counts are small
fn weight(count: usize, min: usize, max: usize) -> TagWeight {
    if max == min {
        return TagWeight::S;
    }
    let ratio = (count - min) as f64 / (max - min) as f64;
    match ratio {
        r if r > 0.7 => TagWeight::Xl,
        r if r > 0.5 => TagWeight::L,
        r if r > 0.3 => TagWeight::M,
        _ => TagWeight::S,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(counts: &[(&str, usize)]) -> Vec<TagCount> {
        counts
            .iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn test_weight_tiers() {
        assert_eq!(weight(11, 1, 11), TagWeight::Xl);
        assert_eq!(weight(8, 1, 11), TagWeight::L); // 0.7 is not > 0.7
        assert_eq!(weight(7, 1, 11), TagWeight::L);
        assert_eq!(weight(5, 1, 11), TagWeight::M);
        assert_eq!(weight(4, 1, 11), TagWeight::S);
        assert_eq!(weight(1, 1, 11), TagWeight::S);
    }

    #[test]
    fn test_equal_counts() {
        let cloud = tag_cloud(&tags(&[("a", 3), ("b", 3)]), 30);
        assert!(cloud.iter().all(|t| t.weight == TagWeight::S));
    }

    #[test]
    fn test_truncates_to_max() {
        let cloud = tag_cloud(&tags(&[("spring", 8), ("jinx", 5), ("Go", 1)]), 2);
        assert_eq!(cloud.len(), 2);
        // min/max are taken over the shown tags only
        assert_eq!(cloud[0].weight, TagWeight::Xl);
        assert_eq!(cloud[1].weight, TagWeight::S);
    }

    #[test]
    fn test_href_encoding() {
        assert_eq!(tag_href("spring"), "/tags/spring");
        assert_eq!(tag_href("schema matching"), "/tags/schema%20matching");
        assert_eq!(tag_href("코드리뷰"), "/tags/%EC%BD%94%EB%93%9C%EB%A6%AC%EB%B7%B0");
    }

    #[test]
    fn test_empty() {
        assert!(tag_cloud(&[], 30).is_empty());
    }
}
