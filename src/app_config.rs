use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "hooksig";
const CONFIG_FILE_NAME: &str = "config.json";
pub const PUBLIC_KEY_ENV: &str = "HOOKSIG_PUBLIC_KEY_PATH";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub public_key_path: Option<PathBuf>,
}

pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, AppError> {
        Self::at(Self::get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Opens the config stored at `config_path`. A missing file is an empty config.
    pub fn at(config_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut manager = Self {
            config: AppConfig::default(),
            config_path: config_path.into(),
        };
        manager.load()?;
        Ok(manager)
    }

    fn get_config_dir() -> Result<PathBuf, AppError> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| AppError::Config("Could not determine config directory.".into()))
    }

    fn load(&mut self) -> Result<(), AppError> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path).map_err(|e| AppError::Io {
                path: self.config_path.clone(),
                source: e,
            })?;
            if !content.trim().is_empty() {
                self.config = serde_json::from_str(&content)?;
            }
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), AppError> {
        let config_dir = self
            .config_path
            .parent()
            .ok_or_else(|| AppError::Config("Invalid configuration file path.".to_string()))?;
        fs::create_dir_all(config_dir).map_err(|e| AppError::Io {
            path: config_dir.to_path_buf(),
            source: e,
        })?;
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, content).map_err(|e| AppError::Io {
            path: self.config_path.clone(),
            source: e,
        })
    }

    /// Environment variable first, then the config file.
    pub fn get_public_key_path(&self) -> Option<PathBuf> {
        env::var(PUBLIC_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.config.public_key_path.clone())
    }

    pub fn set_public_key_path(&mut self, path: PathBuf) {
        self.config.public_key_path = Some(path);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
