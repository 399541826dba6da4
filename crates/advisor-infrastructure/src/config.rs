//! Advisor configuration.
//!
//! Configuration priority: environment variables > `~/.config/routine-advisor/config.toml` > defaults.
//!
//! ```toml
//! endpoint = "https://advisor.example.workers.dev"
//! catalog = "products.json"            # local path or http(s) URL
//! storage_dir = "/var/lib/advisor"     # optional
//! log_dir = "/var/log/advisor"         # optional
//! system_prompt = "You are ..."        # optional
//! ```

use advisor_core::advisory::SYSTEM_DIRECTIVE;
use advisor_core::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::paths::AdvisorPaths;

pub const ENV_ENDPOINT: &str = "ADVISOR_ENDPOINT";
pub const ENV_CATALOG: &str = "ADVISOR_CATALOG";
pub const ENV_STORAGE_DIR: &str = "ADVISOR_STORAGE_DIR";
pub const ENV_LOG_DIR: &str = "ADVISOR_LOG_DIR";

const DEFAULT_CATALOG: &str = "products.json";

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CatalogLocation {
    File(PathBuf),
    Url(String),
}

impl CatalogLocation {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogLocation::Url(trimmed.to_string())
        } else {
            CatalogLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for CatalogLocation {
    fn default() -> Self {
        CatalogLocation::File(PathBuf::from(DEFAULT_CATALOG))
    }
}

impl From<String> for CatalogLocation {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<CatalogLocation> for String {
    fn from(location: CatalogLocation) -> Self {
        location.to_string()
    }
}

impl fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLocation::File(path) => write!(f, "{}", path.display()),
            CatalogLocation::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Advisory endpoint URL. Injected by the deployment, never hard-coded.
    pub endpoint: Option<String>,
    pub catalog: CatalogLocation,
    /// Directory for `storage.json`. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Directory for rolling log files. Defaults to `logs/` in the data directory.
    pub log_dir: Option<PathBuf>,
    /// Overrides the built-in advisor persona.
    pub system_prompt: Option<String>,
}

impl AdvisorConfig {
    /// Loads `~/.config/routine-advisor/config.toml` (if present) and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let config = match AdvisorPaths::config_file() {
            Ok(path) => Self::load_from(&path)?,
            Err(err) => {
                tracing::warn!("[AdvisorConfig] {}; using defaults", err);
                Self::default()
            }
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Loads a TOML config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("[AdvisorConfig] No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| {
            AdvisorError::config(format!("Invalid config {}: {}", path.display(), err))
        })
    }

    /// Applies overrides from `lookup` (normally the process environment).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(catalog) = lookup(ENV_CATALOG) {
            self.catalog = CatalogLocation::parse(&catalog);
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// The configured endpoint, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Configuration` if the endpoint is absent or blank.
    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| {
                AdvisorError::config(format!(
                    "Advisory endpoint not set. Define `endpoint` in config.toml or {}",
                    ENV_ENDPOINT
                ))
            })
    }

    pub fn storage_file(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.join("storage.json")),
            None => AdvisorPaths::storage_file().map_err(|e| AdvisorError::config(e.to_string())),
        }
    }

    /// Where file logs go, or `None` when no directory can be resolved.
    pub fn log_dir(&self) -> Option<PathBuf> {
        match &self.log_dir {
            Some(dir) => Some(dir.clone()),
            None => AdvisorPaths::log_dir().ok(),
        }
    }

    pub fn system_directive(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(SYSTEM_DIRECTIVE)
    }
}
