// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted CLI preferences and the JSON config store behind them.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use fixq_core::NumberFormat;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Key under which [`CliPrefs`] are stored.
pub const PREFS_KEY: &str = "prefs";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Culture name with no built-in table.
    #[error("unknown culture `{0}`")]
    UnknownCulture(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value for `key`. `Ok(None)` if missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist the value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

/// Config blobs as `<key>.json` files in one directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at the platform config directory (e.g. `~/.config/fixq`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "fixq")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self::at(proj.config_dir()))
    }

    /// Store rooted at `dir`; the directory is created on first save.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            base: dir.as_ref().to_path_buf(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base)?;
        fs::write(self.path_for(key), data)?;
        Ok(())
    }
}

/// Which fixed-point representation a command operates on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KindChoice {
    /// Signed Q16.16.
    #[default]
    Fix16,
    /// Unsigned Q16.16.
    Ufix16,
    /// Unsigned Q8.8.
    Ufix8,
}

/// Saved defaults for the `fixq` CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliPrefs {
    /// Kind used when `--kind` is not given.
    pub kind: KindChoice,
    /// Built-in culture name used when `--culture` is not given.
    pub culture: String,
    /// Pattern for `fixq format` when none is given.
    pub format: String,
    /// Custom culture; takes precedence over `culture` when present.
    pub custom_culture: Option<NumberFormat>,
}

impl Default for CliPrefs {
    fn default() -> Self {
        Self {
            kind: KindChoice::default(),
            culture: "invariant".to_owned(),
            format: "G".to_owned(),
            custom_culture: None,
        }
    }
}

impl CliPrefs {
    /// Applies command-line overrides. An explicit culture name replaces any
    /// stored custom culture.
    pub fn with_overrides(mut self, kind: Option<KindChoice>, culture: Option<&str>) -> Self {
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(name) = culture {
            name.clone_into(&mut self.culture);
            self.custom_culture = None;
        }
        self
    }

    /// Resolves the effective culture.
    pub fn number_format(&self) -> Result<NumberFormat, ConfigError> {
        if let Some(custom) = &self.custom_culture {
            return Ok(custom.clone());
        }
        NumberFormat::for_culture(&self.culture)
            .ok_or_else(|| ConfigError::UnknownCulture(self.culture.clone()))
    }
}
