//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
//! 3. Environment variables: `KINTREE_*` prefix

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::factory::{DEFAULT_ADULT_AGE, DEFAULT_REFERENCE_YEAR};
use crate::render::RendererKind;
use crate::traversal::TraversalKind;

/// Unified configuration for kintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fixed reference year for the adult/minor classification rule
    pub reference_year: i32,
    /// Age at the reference year from which marriage is unrestricted
    pub adult_age: i32,
    /// Traversal strategy for generation queries
    pub traversal: TraversalKind,
    /// Renderer for generation listings
    pub renderer: RendererKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            adult_age: DEFAULT_ADULT_AGE,
            traversal: TraversalKind::BreadthFirst,
            renderer: RendererKind::Indented,
        }
    }
}

/// Errors from loading or writing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Load(#[from] ConfigError),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("cannot determine config directory")]
    NoConfigDir,
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

impl Settings {
    /// Load settings with the documented precedence.
    pub fn load() -> SettingsResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = global_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        let cfg = builder
            .add_source(Environment::with_prefix("KINTREE").try_parsing(true))
            .build()?;
        // serde defaults fill anything the sources leave unset
        Ok(cfg.try_deserialize()?)
    }

    /// Load settings from one explicit file (tests, ad-hoc overrides).
    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let cfg = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write these settings to the global config path, creating directories
    /// as needed. Returns the path written.
    pub fn write_global(&self) -> SettingsResult<PathBuf> {
        let path = global_config_path().ok_or(SettingsError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }
}

/// The global config file path, if a home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kintree").map(|dirs| dirs.config_dir().join("kintree.toml"))
}
