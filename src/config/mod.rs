use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::utils::PathResolver,
    currency::LocalePreset,
    errors::Result,
    ledger::DEFAULT_STORAGE_KEY,
    utils::persistence::{ensure_dir, write_atomic},
};

pub const DEFAULT_EXPORT_FILE: &str = "transactions.xlsx";

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: LocalePreset,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Config::default_export_file")]
    pub export_file: String,
}

impl Config {
    fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    fn default_export_file() -> String {
        DEFAULT_EXPORT_FILE.into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: LocalePreset::default(),
            storage_key: Self::default_storage_key(),
            theme: Theme::default(),
            export_file: Self::default_export_file(),
        }
    }
}

/// Loads and saves `config.json` under the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Returns defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Directory holding the durable ledger slots.
    pub fn storage_dir(&self) -> PathBuf {
        PathResolver::storage_dir_in(&self.base)
    }
}
