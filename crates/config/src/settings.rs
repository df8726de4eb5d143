// Application settings
// Loaded from ~/.config/bucketlens/settings.toml (or $BUCKETLENS_CONFIG)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::namespace::NamespaceRef;

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "BUCKETLENS_CONFIG";

/// Listing export extensions probed when resolving a bucket, in order.
const LISTING_EXTENSIONS: &[&str] = &["jsonl", "ndjson", "json", "csv"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config validation error: {0}")]
    Validation(String),
    #[error("alias '{0}' not found in settings")]
    UnknownAlias(String),
    #[error("invalid namespace '{0}' (expected alias/bucket[/prefix])")]
    InvalidNamespace(String),
    #[error("no listing export for bucket '{bucket}' in {dir}")]
    ListingNotFound { bucket: String, dir: String },
}

/// Defaults for `compare`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareSettings {
    /// Compare every version instead of current versions only.
    pub versions: bool,
}

/// Defaults for report rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub verbose: bool,
    pub json: bool,
}

/// Where the listing exports of one storage alias live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Directory holding `<bucket>.jsonl`, `<bucket>.json` or `<bucket>.csv`.
    pub listing_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub compare: CompareSettings,
    pub output: OutputSettings,
    pub aliases: BTreeMap<String, AliasConfig>,

    /// Directory relative `listing_dir` values resolve against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bucketlens")
            .join("settings.toml")
    }

    /// Load settings from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut settings = Self::from_toml(&contents)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(
            path = %path.display(),
            aliases = settings.aliases.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, alias) in &self.aliases {
            if name.is_empty() || name.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "alias name '{name}' must be non-empty and contain no '/'"
                )));
            }
            if alias.listing_dir.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "alias '{name}': listing_dir is empty"
                )));
            }
        }
        Ok(())
    }

    /// Find the listing export for a namespace's bucket.
    pub fn resolve(&self, ns: &NamespaceRef) -> Result<PathBuf, ConfigError> {
        let alias = self
            .aliases
            .get(&ns.alias)
            .ok_or_else(|| ConfigError::UnknownAlias(ns.alias.clone()))?;

        let dir = match &self.base_dir {
            Some(base) if alias.listing_dir.is_relative() => base.join(&alias.listing_dir),
            _ => alias.listing_dir.clone(),
        };

        LISTING_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{ext}", ns.bucket)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ConfigError::ListingNotFound {
                bucket: ns.bucket.clone(),
                dir: dir.display().to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
