//! Postdex - content index and query layer for a personal blog.

mod cli;
mod config;
mod content;
mod data;
mod display;
mod generator;
mod logger;
mod query;
mod report;
mod serve;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{ContentRegistry, PostKind};
use data::IndexStore;
use display::{Window, group_by_year, tag_cloud};
use query::PostQuery;
use report::Printer;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let query = load_index(&config)?;
    let printer = Printer::new(cli.json);

    match &cli.command {
        Commands::Tags { limit, cloud } => {
            let mut tags = query.all_tags();
            if *cloud {
                let max = limit.unwrap_or(config.content.tag_cloud_max);
                printer.cloud(&tag_cloud(&tags, max));
            } else {
                if let Some(limit) = limit {
                    tags.truncate(*limit);
                }
                printer.tags(&tags);
            }
        }
        Commands::Tag { name } => {
            printer.posts(&format!("#{name}"), &query.posts_by_tag(name), None);
        }
        Commands::Search { query: words } => {
            let needle = words.join(" ");
            printer.posts(&format!("search: {needle}"), &query.search_posts(&needle), None);
        }
        Commands::List { kind, pages } => {
            let posts = query.list(*kind);
            let window = Window::new(posts.len(), config.content.per_load)
                .advance(pages.saturating_sub(1));
            printer.posts(kind.segment(), &posts, Some(window));
        }
        Commands::Show { kind, slug, no_nav: true } => match query.find(*kind, slug) {
            Some(post) => printer.entry(&post),
            None => bail!("no {} with slug `{slug}`", kind.name()),
        },
        Commands::Show { kind, slug, no_nav: false } => match query.neighbors(*kind, slug) {
            Some(neighbors) => printer.post(&neighbors),
            None => bail!("no {} with slug `{slug}`", kind.name()),
        },
        Commands::Years { kind } => {
            let posts = match kind {
                Some(kind) => query.list(*kind),
                None => query.all_posts(),
            };
            printer.years(&group_by_year(&posts));
        }
        Commands::Misc { pages } => {
            let feed = query.misc_feed();
            let window = Window::new(feed.len(), config.content.per_load)
                .advance(pages.saturating_sub(1));
            printer.misc(&feed, window, config.content.excerpt_len);
        }
        Commands::Export { .. } => generator::export(&config, &IndexStore::new(query))?,
        Commands::Serve { .. } => serve::serve_index(&config, IndexStore::new(query))?,
    }

    Ok(())
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file means defaults; the content directory still has to
/// exist.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate(cli)?;

    Ok(config)
}

/// Read every registry under the configured content directory.
fn load_index(config: &SiteConfig) -> Result<PostQuery> {
    let dir = &config.content.dir;
    if !dir.is_dir() {
        bail!("Content directory not found: {}", dir.display());
    }

    let registry = ContentRegistry::load(dir)
        .with_context(|| format!("Failed to load content from {}", dir.display()))?;

    let counts: Vec<String> = PostKind::UNION_ORDER
        .iter()
        .map(|&kind| format!("{} {}", registry.collection(kind).len(), kind.segment()))
        .collect();
    log!("content"; "{}, {} misc", counts.join(", "), registry.misc().len());

    Ok(PostQuery::new(registry))
}
