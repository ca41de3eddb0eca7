// src/config/mod.rs
//
// Application configuration
//
// PRINCIPLES:
// - One TOML file, every key optional
// - A missing or empty file means defaults
// - Data files default to {APP_DATA}/cardcollection

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::integrations::mtgio::DEFAULT_BASE_URL;

const APP_DIR: &str = "cardcollection";
const CONFIG_FILE: &str = "config.toml";
const CARD_DATA_FILE: &str = "carddata";
const SET_DATA_FILE: &str = "setdata";
const IMAGE_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of all stored data
    pub data_dir: PathBuf,

    /// Snapshot of the card collection
    pub card_data_file: PathBuf,

    /// Snapshot of the set catalogue
    pub set_data_file: PathBuf,

    /// Directory holding card images
    pub image_dir: PathBuf,

    /// Filter directive, e.g. "info" or "cardcollection=debug"
    pub log_level: String,

    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::for_data_dir(data_dir)
    }
}

impl AppConfig {
    fn for_data_dir(data_dir: PathBuf) -> Self {
        Self {
            card_data_file: data_dir.join(CARD_DATA_FILE),
            set_data_file: data_dir.join(SET_DATA_FILE),
            image_dir: data_dir.join(IMAGE_DIR),
            data_dir,
            log_level: "info".to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Default location of the config file
    ///
    /// Path structure: {CONFIG_DIR}/cardcollection/config.toml
    pub fn default_path() -> AppResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`; a missing or empty file yields the defaults
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&content)?;
        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Configuration stored to {:?}", path);
        Ok(())
    }

    /// Move every data file below `data_dir`
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        let relocated = Self::for_data_dir(data_dir.into());
        self.card_data_file = relocated.card_data_file;
        self.set_data_file = relocated.set_data_file;
        self.image_dir = relocated.image_dir;
        self.data_dir = relocated.data_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.card_data_file.ends_with("cardcollection/carddata"));
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.image_dir, AppConfig::default().image_dir);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig::default().with_data_dir(dir.path().join("data"));

        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_with_data_dir_moves_all_files() {
        let config = AppConfig::default().with_data_dir("/srv/cards");
        assert_eq!(config.data_dir, PathBuf::from("/srv/cards"));
        assert_eq!(config.card_data_file, PathBuf::from("/srv/cards/carddata"));
        assert_eq!(config.set_data_file, PathBuf::from("/srv/cards/setdata"));
        assert_eq!(config.image_dir, PathBuf::from("/srv/cards/images"));
    }
}
