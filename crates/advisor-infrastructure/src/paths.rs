//! Path management for advisor configuration and local storage.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/routine-advisor/   # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/routine-advisor/
//! ├── storage.json             # Local key-value storage (persisted selection)
//! └── logs/                    # Rolling log files
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "routine-advisor";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

pub struct AdvisorPaths;

impl AdvisorPaths {
    /// Returns the advisor configuration directory (e.g. `~/.config/routine-advisor/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the advisor data directory (e.g. `~/.local/share/routine-advisor/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    pub fn log_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
