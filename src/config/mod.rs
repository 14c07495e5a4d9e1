//! Site configuration management for `postdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)               |
//! | `[content]` | Registry directory and listing sizes             |
//! | `[build]`   | Export paths for sitemap and JSON data           |
//! | `[serve]`   | Query server (interface, port)                   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "cassidycodes"
//! url = "https://cassidycodes.vercel.app"
//!
//! [content]
//! dir = "content"
//! per_load = 10
//!
//! [build]
//! output = "public"
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
mod content;
pub mod defaults;
mod error;
mod serve;

pub use base::BaseConfig;
use build::BuildConfig;
use content::ContentConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing postdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content registry settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Export settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Query server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Absolute path of the sitemap file.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// Absolute path of the JSON data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.build.output.join(&self.build.data)
    }

    /// Update configuration with CLI arguments.
    ///
    /// Content and output directories are resolved against `--root`.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = Self::normalize_path(cli.root.as_deref().unwrap_or(Path::new("./")));

        Self::update_option(&mut self.content.dir, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        self.content.dir = Self::normalize_path(&root.join(&self.content.dir));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));

        match &cli.command {
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Export { sitemap } => {
                Self::update_option(&mut self.build.sitemap.enable, sitemap.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.content.per_load == 0 {
            bail!(ConfigError::Validation(
                "[content.per_load] must be greater than zero".into()
            ));
        }

        if cli.is_export() && self.build.sitemap.enable && self.base.url.is_none() {
            bail!("[base.url] is required for sitemap generation");
        }

        if matches!(cli.command, Commands::Serve { .. }) {
            self.serve.ip()?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
