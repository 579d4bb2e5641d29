use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::compendium::remote::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::search::DEFAULT_DEBOUNCE_MS;

/// Category listings a new search tab is seeded with, in display order.
pub const DEFAULT_SEED_CATEGORIES: &[&str] = &[
    "/api/classes",
    "/api/races",
    "/api/monsters",
    "/api/spells",
    "/api/equipment",
    "/api/magic-items",
    "/api/traits",
    "/api/alignments",
    "/api/magic-schools",
];

/// A config file that exists but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub search: SearchConfig,
}

/// Which compendium backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Bundled JSON dataset held in memory.
    Local,
    /// The public HTTP API.
    #[default]
    Remote,
}

/// Data access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: SourceKind,
    /// Dataset file for the local source. Defaults to `<data_dir>/compendium.json`.
    pub dataset_path: Option<PathBuf>,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Bound on memoized records; `None` keeps every resolved record.
    pub cache_capacity: Option<usize>,
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Search session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before typed search text is applied.
    pub debounce_ms: u64,
    pub seed_categories: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            dataset_path: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_capacity: None,
            data_dir: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            seed_categories: DEFAULT_SEED_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/questscribe/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Like [`AppConfig::load`], but reports an unusable file to the caller.
    /// A missing file is not an error.
    pub fn try_load() -> Result<Self, ConfigError> {
        Self::try_load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback rules.
    pub fn load_from(config_path: &Path) -> Self {
        Self::try_load_from(config_path).unwrap_or_else(|e| {
            log::warn!("{e}; using defaults");
            Self::default()
        })
    }

    pub fn try_load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: config_path.to_path_buf(),
                    source,
                })
            }
        };
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("questscribe"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Dataset file used by the local source.
    pub fn dataset_path(&self) -> PathBuf {
        self.data
            .dataset_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join("compendium.json"))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("questscribe").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
