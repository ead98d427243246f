//! Site error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving site configuration
#[derive(Error, Debug)]
pub enum SiteError {
    /// Config file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the site schema
    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
