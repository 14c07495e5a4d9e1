//! JSON data export.
//!
//! Writes `pages.json` (every annotated post, newest first) and `tags.json`
//! (tag counts) into the configured data directory.

use crate::{config::SiteConfig, data::IndexStore, log};
use anyhow::{Context, Result};
use std::{fs, path::Path};

const PAGES_FILE: &str = "pages.json";
const TAGS_FILE: &str = "tags.json";

pub fn build_data(config: &SiteConfig, store: &IndexStore) -> Result<()> {
    write_data(&config.data_dir(), store)
}

fn write_data(dir: &Path, store: &IndexStore) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for (name, json) in [
        (PAGES_FILE, store.pages_to_json()),
        (TAGS_FILE, store.tags_to_json()),
    ] {
        let path = dir.join(name);
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    log!("export"; "{} ({} posts)", dir.display(), store.query().registry().len());
    Ok(())
}
