//! Run configuration, read from an optional TOML file.
//!
//! ```toml
//! log = "info"
//!
//! [store]
//! path = "multiverse.db"
//! wal = true
//!
//! [exploration]
//! seed = "80"
//! max_expansions = 100000
//! ```
//!
//! Every field has a default; an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use multiverse::{BoardId, BoardIdParseError};
use multiverse_store::StoreOptions;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid seed {seed:?}: {source}")]
    Seed {
        seed: String,
        #[source]
        source: BoardIdParseError,
    },
}

/// Main configuration for an exploration run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log: String,

    pub store: StoreConfig,

    pub exploration: ExplorationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub wal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorationConfig {
    /// Hex identifier of the root board; the single live cell when unset.
    pub seed: Option<String>,
    /// Stop after this many expansions; unbounded when unset.
    pub max_expansions: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            log: "info".to_string(),
            store: StoreConfig::default(),
            exploration: ExplorationConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("multiverse.db"),
            wal: StoreOptions::default().wal,
        }
    }
}

impl ExplorerConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.seed_id()?;
        Ok(config)
    }

    /// The configured seed, or the single live cell.
    pub fn seed_id(&self) -> Result<BoardId, ConfigError> {
        match &self.exploration.seed {
            None => Ok(BoardId::single_cell()),
            Some(hex) => hex.parse().map_err(|source| ConfigError::Seed {
                seed: hex.clone(),
                source,
            }),
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            wal: self.store.wal,
        }
    }
}
