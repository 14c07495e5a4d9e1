//! Loading and ingesting the fixed content collections.
//!
//! Every collection is read once, validated, and tagged with its [`PostKind`].
//! After that the registry is never mutated.

use super::{
    date::PostDate,
    error::ContentError,
    types::{MiscNote, MiscRecord, Post, PostKind, PostRecord},
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, de::DeserializeOwned};
use std::{fs, path::Path};

/// File holding the optional misc notes.
pub const MISC_FILE: &str = "misc.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PostFile {
    #[serde(default)]
    posts: Vec<PostRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MiscFile {
    #[serde(default)]
    notes: Vec<MiscRecord>,
}

/// The three post collections plus misc notes.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    articles: Vec<Post>,
    til: Vec<Post>,
    reflections: Vec<Post>,
    misc: Vec<MiscNote>,
}

impl ContentRegistry {
    /// Load every registry file found in `dir`.
    ///
    /// Missing files are empty collections.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let records = |kind: PostKind| -> Result<Vec<PostRecord>, ContentError> {
            let file: PostFile = read_registry(&dir.join(kind.registry_file()))?;
            Ok(file.posts)
        };

        let registry = Self::from_records(
            records(PostKind::Article)?,
            records(PostKind::Til)?,
            records(PostKind::Reflection)?,
        )?;

        let misc: MiscFile = read_registry(&dir.join(MISC_FILE))?;
        registry.with_misc(misc.notes)
    }

    /// Build a registry from raw records, attaching each collection's kind.
    pub fn from_records(
        articles: Vec<PostRecord>,
        til: Vec<PostRecord>,
        reflections: Vec<PostRecord>,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            articles: ingest(PostKind::Article, articles)?,
            til: ingest(PostKind::Til, til)?,
            reflections: ingest(PostKind::Reflection, reflections)?,
            misc: Vec::new(),
        })
    }

    pub fn with_misc(mut self, notes: Vec<MiscRecord>) -> Result<Self, ContentError> {
        let mut ids = FxHashSet::default();
        self.misc = notes
            .into_iter()
            .map(|record| {
                if !ids.insert(record.id.clone()) {
                    return Err(ContentError::Duplicate {
                        collection: "misc",
                        field: "id",
                        value: record.id,
                    });
                }
                let date = PostDate::parse(&record.date).ok_or_else(|| ContentError::InvalidDate {
                    collection: "misc",
                    id: record.id.clone(),
                    value: record.date.clone(),
                })?;
                Ok(MiscNote {
                    id: record.id,
                    content: record.content,
                    date,
                    author: record.author,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Posts of one collection, in registry order.
    pub fn collection(&self, kind: PostKind) -> &[Post] {
        match kind {
            PostKind::Article => &self.articles,
            PostKind::Til => &self.til,
            PostKind::Reflection => &self.reflections,
        }
    }

    /// All posts: TILs, then articles, then reflections.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        PostKind::UNION_ORDER
            .into_iter()
            .flat_map(move |kind| self.collection(kind).iter())
    }

    pub fn misc(&self) -> &[MiscNote] {
        &self.misc
    }

    /// Number of posts across the three collections.
    pub fn len(&self) -> usize {
        self.articles.len() + self.til.len() + self.reflections.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read a registry file, treating a missing file as an empty registry.
fn read_registry<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ContentError> {
    if !path.is_file() {
        return Ok(T::default());
    }
    let content =
        fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    toml::from_str(&content).map_err(|err| ContentError::Toml(path.to_path_buf(), err))
}

/// Validate one collection and attach its kind.
fn ingest(kind: PostKind, records: Vec<PostRecord>) -> Result<Vec<Post>, ContentError> {
    let collection = kind.name();
    let mut ids = FxHashSet::default();
    let mut slugs = FxHashSet::default();

    records
        .into_iter()
        .map(|record| {
            if record.slug.trim().is_empty() {
                return Err(ContentError::EmptySlug {
                    collection,
                    id: record.id,
                });
            }
            if !ids.insert(record.id.clone()) {
                return Err(ContentError::Duplicate {
                    collection,
                    field: "id",
                    value: record.id,
                });
            }
            if !slugs.insert(record.slug.clone()) {
                return Err(ContentError::Duplicate {
                    collection,
                    field: "slug",
                    value: record.slug,
                });
            }

            let date = PostDate::parse(&record.date).ok_or_else(|| ContentError::InvalidDate {
                collection,
                id: record.id.clone(),
                value: record.date.clone(),
            })?;

            Ok(Post {
                kind,
                id: record.id,
                title: record.title,
                subtitle: record.subtitle,
                date,
                tags: record.tags,
                slug: record.slug,
                content_path: record.content_path,
            })
        })
        .collect()
}
