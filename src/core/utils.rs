use dirs::home_dir;
use std::{env, path::PathBuf};

const HOME_ENV: &str = "CASHFLOW_HOME";
const DEFAULT_DIR_NAME: &str = ".cashflow";
const STORAGE_DIR: &str = "storage";
const CONFIG_FILE: &str = "config.json";

/// Resolves where the application keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// `$CASHFLOW_HOME`, else `~/.cashflow`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn storage_dir_in(base: &std::path::Path) -> PathBuf {
        base.join(STORAGE_DIR)
    }

    pub fn config_file_in(base: &std::path::Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}
