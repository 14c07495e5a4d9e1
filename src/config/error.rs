//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why `postdex.toml` could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed postdex.toml")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
