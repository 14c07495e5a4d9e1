//! Sitemap generation.
//!
//! Generates a sitemap.xml listing the section pages and every post page for
//! search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/articles/sprout1</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.9</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, content::PostKind, log, query::PostQuery};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use std::{fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Section pages, listed before any post.
const STATIC_PAGES: [(&str, ChangeFreq, f32); 7] = [
    ("/", ChangeFreq::Daily, 1.0),
    ("/articles", ChangeFreq::Weekly, 0.8),
    ("/til", ChangeFreq::Weekly, 0.8),
    ("/reflections", ChangeFreq::Monthly, 0.8),
    ("/misc", ChangeFreq::Daily, 0.6),
    ("/tags", ChangeFreq::Weekly, 0.5),
    ("/search", ChangeFreq::Weekly, 0.5),
];

/// Post collections in sitemap order.
const POST_SECTIONS: [PostKind; 3] = [PostKind::Article, PostKind::Til, PostKind::Reflection];

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, query: &PostQuery) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }

    let base_url = config
        .base
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("[base.url] is required for sitemap generation"))?;
    let today = chrono::Local::now().date_naive();

    Sitemap::from_query(query, base_url, today).write(&config.sitemap_path())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD)
    lastmod: String,
    changefreq: ChangeFreq,
    priority: f32,
}

impl Sitemap {
    /// Collect section pages (last modified `today`) followed by every post,
    /// each collection in registry order.
    fn from_query(query: &PostQuery, base_url: &str, today: NaiveDate) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let today = today.format("%Y-%m-%d").to_string();

        let pages = STATIC_PAGES
            .iter()
            .map(|&(path, changefreq, priority)| UrlEntry {
                loc: format!("{base_url}{path}"),
                lastmod: today.clone(),
                changefreq,
                priority,
            });

        let posts = POST_SECTIONS.iter().flat_map(move |&kind| {
            query
                .registry()
                .collection(kind)
                .iter()
                .map(move |post| UrlEntry {
                    loc: format!("{base_url}{}", post.href()),
                    lastmod: post.date.ymd(),
                    changefreq: ChangeFreq::Monthly,
                    priority: post_priority(kind),
                })
        });

        Self {
            urls: pages.chain(posts).collect(),
        }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, sitemap_path: &Path) -> Result<()> {
        let count = self.urls.len();
        let xml = self.into_xml();

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("export"; "{} ({count} urls)", sitemap_path.display());
        Ok(())
    }
}

const fn post_priority(kind: PostKind) -> f32 {
    match kind {
        PostKind::Article => 0.9,
        PostKind::Reflection => 0.8,
        PostKind::Til => 0.7,
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRegistry, record};

    const BASE: &str = "https://cassidycodes.vercel.app";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn query() -> PostQuery {
        let registry = ContentRegistry::from_records(
            vec![
                record("1", "2025-01-07T09:00:00", &["spring"], "sprout1"),
                record("2", "2025-01-14T09:00:00", &["spring"], "sprout2"),
            ],
            vec![record("1", "2025-03-02T21:00:00", &["rust"], "memory-rust")],
            vec![record("1", "2024-12-31", &["회고"], "2024-retro")],
        )
        .unwrap();
        PostQuery::new(registry)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty_registry_has_sections() {
        let xml = Sitemap::from_query(&PostQuery::default(), BASE, today()).into_xml();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
        assert!(xml.contains(&format!("<loc>{BASE}/</loc>")));
        assert!(xml.contains(&format!("<loc>{BASE}/search</loc>")));
        assert!(xml.contains("<lastmod>2025-06-01</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_sitemap_post_entries() {
        let xml = Sitemap::from_query(&query(), BASE, today()).into_xml();

        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len() + 4);
        assert!(xml.contains(&format!("<loc>{BASE}/articles/sprout1</loc>")));
        assert!(xml.contains(&format!("<loc>{BASE}/til/memory-rust</loc>")));
        assert!(xml.contains(&format!("<loc>{BASE}/reflections/2024-retro</loc>")));
        assert!(xml.contains("<lastmod>2025-03-02</lastmod>"));
        assert!(xml.contains("<lastmod>2024-12-31</lastmod>"));
    }

    #[test]
    fn test_sitemap_order_and_priorities() {
        let sitemap = Sitemap::from_query(&query(), BASE, today());
        let locs: Vec<String> = sitemap.urls.iter().map(|u| u.loc.clone()).collect();

        assert_eq!(locs[0], format!("{BASE}/"));
        assert_eq!(locs[7..], [
            format!("{BASE}/articles/sprout1"),
            format!("{BASE}/articles/sprout2"),
            format!("{BASE}/til/memory-rust"),
            format!("{BASE}/reflections/2024-retro"),
        ]);

        let priorities: Vec<f32> = sitemap.urls[7..].iter().map(|u| u.priority).collect();
        assert_eq!(priorities, [0.9, 0.9, 0.7, 0.8]);
        assert!(sitemap.urls[7..]
            .iter()
            .all(|u| u.changefreq == ChangeFreq::Monthly));
    }

    #[test]
    fn test_sitemap_priority_format() {
        let xml = Sitemap::from_query(&query(), BASE, today()).into_xml();
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
    }

    #[test]
    fn test_sitemap_trailing_slash_base() {
        let sitemap = Sitemap::from_query(&PostQuery::default(), "https://example.com/", today());
        assert_eq!(sitemap.urls[1].loc, "https://example.com/articles");
    }

    #[test]
    fn test_sitemap_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("sitemap.xml");

        Sitemap::from_query(&query(), BASE, today()).write(&path).unwrap();

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.contains("sprout2"));
    }

    #[test]
    fn test_build_sitemap_requires_url() {
        let mut config = SiteConfig::default();
        assert!(build_sitemap(&config, &query()).is_err());

        config.build.sitemap.enable = false;
        assert!(build_sitemap(&config, &query()).is_ok());
    }
}
