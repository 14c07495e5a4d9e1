//! `[content]` section configuration.
//!
//! Where the registries live and how listings are shaped.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in postdex.toml.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"      # holds articles.toml, til.toml, reflections.toml, misc.toml
/// per_load = 10        # posts revealed per "load more"
/// tag_cloud_max = 30   # tags shown in the cloud
/// excerpt_len = 150    # characters before a misc note is cut
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory containing the registry files.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    #[serde(default = "defaults::content::per_load")]
    #[educe(Default = defaults::content::per_load())]
    pub per_load: usize,

    #[serde(default = "defaults::content::tag_cloud_max")]
    #[educe(Default = defaults::content::tag_cloud_max())]
    pub tag_cloud_max: usize,

    #[serde(default = "defaults::content::excerpt_len")]
    #[educe(Default = defaults::content::excerpt_len())]
    pub excerpt_len: usize,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_content_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]\ntitle = \"Test\"").unwrap();

        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.per_load, 10);
        assert_eq!(config.content.tag_cloud_max, 30);
        assert_eq!(config.content.excerpt_len, 150);
    }

    #[test]
    fn test_content_config_override() {
        let config = r#"
            [base]
            title = "Test"

            [content]
            dir = "data/posts"
            per_load = 5
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.content.dir, PathBuf::from("data/posts"));
        assert_eq!(config.content.per_load, 5);
        assert_eq!(config.content.tag_cloud_max, 30);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"

            [content]
            articles = "articles.toml"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
