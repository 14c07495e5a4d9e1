//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::content::PostKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Postdex blog content index CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Config file name (default: postdex.toml)
    #[arg(short = 'C', long, default_value = "postdex.toml", global = true)]
    pub config: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every tag with its post count, most used first
    Tags {
        /// Show at most this many tags
        #[arg(short, long)]
        limit: Option<usize>,

        /// Render as a weighted tag cloud
        #[arg(long)]
        cloud: bool,
    },

    /// List posts carrying a tag, newest first
    Tag {
        /// Exact, case-sensitive tag name
        name: String,
    },

    /// Search titles, subtitles and tags
    Search {
        /// Search words, joined with spaces
        #[arg(num_args = 1.., required = true)]
        query: Vec<String>,
    },

    /// List one collection, newest first
    List {
        /// article, til or reflection
        kind: PostKind,

        /// Number of "load more" pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },

    /// Show one post with its newer and older neighbors
    Show {
        /// article, til or reflection
        kind: PostKind,

        /// Post slug
        slug: String,

        /// Skip the newer and older posts
        #[arg(long)]
        no_nav: bool,
    },

    /// Group posts by year, newest year first
    Years {
        /// Restrict to one collection
        kind: Option<PostKind>,
    },

    /// Show the misc notes feed grouped by day
    Misc {
        /// Number of "load more" pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },

    /// Write sitemap and JSON data files to the output directory
    Export {
        /// enable sitemap generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        sitemap: Option<bool>,
    },

    /// Serve the index as a read-only JSON API
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub const fn is_export(&self) -> bool {
        matches!(self.command, Commands::Export { .. })
    }
}
