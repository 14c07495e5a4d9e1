//! Static file generation from the loaded index.
//!
//! - `sitemap` - `sitemap.xml` for search engines
//! - `data` - `pages.json` and `tags.json`

mod data;
mod sitemap;

use crate::{config::SiteConfig, data::IndexStore};
use anyhow::Result;

/// Write the sitemap and the JSON data files in parallel.
pub fn export(config: &SiteConfig, store: &IndexStore) -> Result<()> {
    let (sitemap_result, data_result) = rayon::join(
        || sitemap::build_sitemap(config, store.query()),
        || data::build_data(config, store),
    );

    sitemap_result?;
    data_result
}
