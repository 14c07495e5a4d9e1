//! Post records, their collections, and the annotated shape handed to callers.

use super::date::PostDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The collection a post was read from.
///
/// Nothing in a record says which kind it is: the kind is attached when the
/// record is ingested from its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Article,
    Til,
    Reflection,
}

impl PostKind {
    /// Union order used by every cross-collection query.
    ///
    /// Posts with identical timestamps keep this relative order after sorting.
    pub const UNION_ORDER: [Self; 3] = [Self::Til, Self::Article, Self::Reflection];

    /// Serialized `type` value.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Til => "til",
            Self::Reflection => "reflection",
        }
    }

    /// First path segment of a post's `href`.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Til => "til",
            Self::Reflection => "reflections",
        }
    }

    /// Registry file name inside the content directory.
    pub const fn registry_file(self) -> &'static str {
        match self {
            Self::Article => "articles.toml",
            Self::Til => "til.toml",
            Self::Reflection => "reflections.toml",
        }
    }

    pub fn href(self, slug: &str) -> String {
        format!("/{}/{slug}", self.segment())
    }

    /// Resolve a path segment (`articles`, `til`, `reflections`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::UNION_ORDER.into_iter().find(|kind| kind.segment() == segment)
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PostKind {
    type Err = String;

    /// Accepts both the type name and the path segment, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::UNION_ORDER
            .into_iter()
            .find(|kind| kind.name() == lower || kind.segment() == lower)
            .ok_or_else(|| format!("unknown collection `{s}` (expected article, til or reflection)"))
    }
}

/// A post as written in a registry file (`[[posts]]` table).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub slug: String,
    #[serde(default, alias = "contentPath")]
    pub content_path: Option<String>,
}

/// A post after ingestion: kind attached, date parsed.
#[derive(Debug, Clone)]
pub struct Post {
    pub kind: PostKind,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: PostDate,
    pub tags: Vec<String>,
    pub slug: String,
    /// Body reference, only resolved by whatever renders the post.
    #[allow(dead_code)]
    pub content_path: Option<String>,
}

impl Post {
    pub fn href(&self) -> String {
        self.kind.href(&self.slug)
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn annotate(&self) -> AnnotatedPost {
        AnnotatedPost {
            id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            date: self.date.clone(),
            tags: self.tags.clone(),
            slug: self.slug.clone(),
            kind: self.kind,
            href: self.href(),
        }
    }
}

/// Query result: a post with its resolved type and navigable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedPost {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: PostDate,
    pub tags: Vec<String>,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub href: String,
}

/// A tag with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Short-form note from `misc.toml`. Not part of the post queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MiscRecord {
    pub id: String,
    pub content: String,
    pub date: String,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    "Me".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiscNote {
    pub id: String,
    pub content: String,
    pub date: PostDate,
    pub author: String,
}
