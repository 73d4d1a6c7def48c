//! Tunables and storage location.
//!
//! Settings come from an optional TOML file; every field has a default so an
//! absent file (the common case) behaves like the stock install.

use crate::core::error::EzjumpError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const APP_DIR: &str = "ezjump";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const PATHS_FILE_NAME: &str = "paths.txt";

pub const DEFAULT_MIN_ACCURACY: f64 = 0.7;
pub const DEFAULT_MAX_PATHS: usize = 250;
pub const DEFAULT_MAX_OPTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Similarity a segment needs to count as a match.
    pub min_accuracy: f64,
    /// Capacity of the path store.
    pub max_paths: usize,
    /// Size of the interactive shortlist.
    pub max_options: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_accuracy: DEFAULT_MIN_ACCURACY,
            max_paths: DEFAULT_MAX_PATHS,
            max_options: DEFAULT_MAX_OPTIONS,
            paths_file: None,
        }
    }
}

impl Settings {
    /// Load from `file`; a missing file yields defaults.
    pub fn load(file: &Path) -> Result<Self, EzjumpError> {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %file.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(EzjumpError::Config(format!(
                    "cannot read {}: {}",
                    file.display(),
                    e
                )));
            }
        };
        Self::parse(&content).map_err(|e| match e {
            EzjumpError::Config(msg) => EzjumpError::Config(format!("{}: {}", file.display(), msg)),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self, EzjumpError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| EzjumpError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EzjumpError> {
        if !(0.0..=1.0).contains(&self.min_accuracy) {
            return Err(EzjumpError::Config(format!(
                "min_accuracy must be within [0, 1], got {}",
                self.min_accuracy
            )));
        }
        if self.max_paths == 0 {
            return Err(EzjumpError::Config("max_paths must be at least 1".into()));
        }
        if self.max_options == 0 {
            return Err(EzjumpError::Config(
                "max_options must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Configured store file, else the per-user data directory.
    pub fn resolve_paths_file(&self) -> Result<PathBuf, EzjumpError> {
        if let Some(file) = &self.paths_file {
            return Ok(file.clone());
        }
        default_paths_file()
    }
}

pub fn default_config_file() -> Result<PathBuf, EzjumpError> {
    let base = dirs::config_dir()
        .ok_or_else(|| EzjumpError::PathError("no config directory for this user".into()))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE_NAME))
}

pub fn default_paths_file() -> Result<PathBuf, EzjumpError> {
    let base = dirs::data_dir()
        .ok_or_else(|| EzjumpError::PathError("no data directory for this user".into()))?;
    Ok(base.join(APP_DIR).join(PATHS_FILE_NAME))
}
