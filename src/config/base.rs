//! `[base]` section configuration.
//!
//! Site identity reported by the query server, plus the base URL the sitemap
//! builds absolute links from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in postdex.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "cassidycodes"
/// description = "GPT, 구글보다 스스로에게 먼저 묻자"
/// author = "Cassidy"
/// url = "https://cassidycodes.vercel.app"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title.
    #[serde(default)]
    pub title: String,

    /// Author name.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description.
    #[serde(default)]
    pub description: String,

    /// Base URL for absolute links in the sitemap.
    /// Required when `[build.sitemap].enable = true` and exporting.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "ko-KR", "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}
