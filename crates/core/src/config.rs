//! Application Configuration
//! 
//! Settings read once at startup:
//! - Android SDK location
//! - Emulator settings, including the snapshot target mode switch

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{DevtargetError, Result};

/// Android SDK configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AndroidConfig {
    /// Path to Android SDK
    pub sdk_path: Option<PathBuf>,
}

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Offer cold boot and snapshot targets in addition to quick boot.
    /// When off, every virtual device exposes a single quick boot target.
    pub snapshots_enabled: bool,
    /// Override for the AVD home directory
    pub avd_home: Option<PathBuf>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            snapshots_enabled: true,
            avd_home: None,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Android SDK settings
    pub android: AndroidConfig,
    /// Emulator settings
    pub emulator: EmulatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            android: AndroidConfig::default(),
            emulator: EmulatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "devtarget", "devtarget")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults if absent
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| DevtargetError::Config("Cannot determine config path".into()))?;

        Self::load_from(&config_file).await
    }

    /// Load configuration from a specific file, writing defaults if absent
    pub async fn load_from(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            debug!("Loading config from {:?}", config_file);
            let contents = tokio::fs::read_to_string(config_file).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(config_file).await?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub async fn save_to(&self, config_file: &Path) -> Result<()> {
        if let Some(parent) = config_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(config_file, contents).await?;
        
        debug!("Config saved to {:?}", config_file);
        Ok(())
    }

    /// Get Android SDK path, with auto-detection
    pub fn get_sdk_path(&self) -> Option<PathBuf> {
        self.android.sdk_path.clone().or_else(|| {
            let from_env = ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
                .iter()
                .filter_map(|var| std::env::var_os(var))
                .map(PathBuf::from);

            let candidates: Vec<Option<PathBuf>> = if cfg!(windows) {
                vec![
                    dirs::config_local_dir().map(|d| d.join("Android").join("Sdk")),
                    Some(PathBuf::from("C:\\Android\\sdk")),
                ]
            } else {
                vec![
                    dirs::home_dir().map(|h: PathBuf| h.join("Android").join("Sdk")),
                    Some(PathBuf::from("/usr/local/android-sdk")),
                ]
            };

            from_env
                .chain(candidates.into_iter().flatten())
                .find(|p: &PathBuf| p.exists())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.emulator.snapshots_enabled);
        assert!(config.emulator.avd_home.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[emulator]\nsnapshots_enabled = false\n").unwrap();
        assert!(!config.emulator.snapshots_enabled);
        assert_eq!(config.version, 1);
        assert!(config.android.sdk_path.is_none());
    }

    #[tokio::test]
    async fn test_load_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("config.toml");

        let first = AppConfig::load_from(&file).await.unwrap();
        assert!(file.exists());
        assert_eq!(first, AppConfig::default());

        let mut changed = first.clone();
        changed.emulator.snapshots_enabled = false;
        changed.emulator.avd_home = Some(PathBuf::from("/tmp/avd"));
        changed.save_to(&file).await.unwrap();

        let reloaded = AppConfig::load_from(&file).await.unwrap();
        assert_eq!(reloaded, changed);
    }

    #[tokio::test]
    async fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        tokio::fs::write(&file, "emulator = [").await.unwrap();

        let err = AppConfig::load_from(&file).await.unwrap_err();
        assert!(matches!(err, DevtargetError::TomlParse(_)));
    }
}
