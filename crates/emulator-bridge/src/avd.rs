//! AVD (Android Virtual Device) Discovery
//!
//! Reads the AVD home directory and turns each AVD into a virtual
//! [`Device`] with its snapshots.

use std::path::{Path, PathBuf};
use tracing::{info, debug, warn};
use configparser::ini::Ini;

use crate::device::{
    Device, DeviceConfig, DeviceError, DeviceKey, DeviceKind, DeviceType,
    LaunchCompatibility, PlatformDevice, VirtualDeviceName,
};
use crate::snapshot::{discover_snapshots, Snapshot};

/// AVD discovery errors
#[derive(Debug, thiserror::Error)]
pub enum AvdError {
    #[error("AVD not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// AVD information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvdInfo {
    pub name: String,
    pub path: PathBuf,
    pub display_name: Option<String>,
    pub tag: String,
    pub target: String,
    pub abi: String,
    pub device_name: Option<String>,
    pub snapshots: Vec<Snapshot>,
}

impl AvdInfo {
    /// Name shown in the picker
    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.name.replace('_', " "))
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::from_tag(&self.tag)
    }

    /// Build the not-yet-running virtual device for this AVD
    pub fn to_device(&self, snapshots_enabled: bool) -> Result<Device, DeviceError> {
        Device::new(DeviceConfig {
            name: self.display_name(),
            device_type: self.device_type(),
            launch_compatibility: LaunchCompatibility::ok(),
            key: DeviceKey::Path(self.path.clone()),
            connection_time: None,
            platform_device: PlatformDevice::Avd {
                name: self.name.clone(),
                path: self.path.clone(),
            },
            kind: DeviceKind::Virtual {
                name_key: Some(VirtualDeviceName(self.name.clone())),
                snapshots: self.snapshots.clone(),
                snapshots_enabled,
            },
        })
    }
}

/// AVD Manager
pub struct AvdManager {
    avd_home: PathBuf,
}

impl AvdManager {
    /// Create a manager over an AVD home directory
    pub fn new(avd_home: PathBuf) -> Self {
        Self { avd_home }
    }

    /// Resolve the AVD home the emulator itself would use
    pub fn default_home() -> PathBuf {
        if let Some(home) = std::env::var_os("ANDROID_AVD_HOME") {
            return PathBuf::from(home);
        }

        for var in ["ANDROID_EMULATOR_HOME", "ANDROID_USER_HOME"] {
            if let Some(dir) = std::env::var_os(var) {
                return PathBuf::from(dir).join("avd");
            }
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".android")
            .join("avd")
    }

    pub fn avd_home(&self) -> &Path {
        &self.avd_home
    }

    /// List all available AVDs, sorted by name
    pub async fn list_avds(&self) -> Result<Vec<AvdInfo>, AvdError> {
        let mut avds = Vec::new();

        if !self.avd_home.exists() {
            debug!("AVD home {:?} does not exist", self.avd_home);
            return Ok(avds);
        }

        let mut entries = tokio::fs::read_dir(&self.avd_home).await?;
        
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            
            if path.extension().map(|e| e == "ini").unwrap_or(false) {
                if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                    let avd_dir = self.avd_home.join(format!("{}.avd", name));
                    
                    match self.parse_avd_info(name, &path, &avd_dir).await {
                        Ok(info) => avds.push(info),
                        Err(e) => warn!("Skipping AVD {}: {}", name, e),
                    }
                }
            }
        }

        avds.sort_by(|a, b| a.name.cmp(&b.name));
        info!("Found {} AVDs in {:?}", avds.len(), self.avd_home);
        Ok(avds)
    }

    /// Look up a single AVD by name
    pub async fn find_avd(&self, name: &str) -> Result<AvdInfo, AvdError> {
        let ini_path = self.avd_home.join(format!("{}.ini", name));
        if !ini_path.exists() {
            return Err(AvdError::NotFound(name.to_string()));
        }

        let avd_dir = self.avd_home.join(format!("{}.avd", name));
        self.parse_avd_info(name, &ini_path, &avd_dir).await
    }

    /// Build a virtual device for every AVD
    pub async fn list_devices(&self, snapshots_enabled: bool) -> Result<Vec<Device>, AvdError> {
        self.list_avds()
            .await?
            .iter()
            .map(|avd| avd.to_device(snapshots_enabled).map_err(AvdError::from))
            .collect()
    }

    /// Parse AVD info from ini files
    async fn parse_avd_info(&self, name: &str, ini_path: &Path, avd_dir: &Path) -> Result<AvdInfo, AvdError> {
        let content = tokio::fs::read_to_string(ini_path).await?;
        let mut ini = Ini::new();
        ini.read(content).map_err(AvdError::Parse)?;

        let path_str = ini.get("default", "path").unwrap_or_default();
        let avd_path = if path_str.trim().is_empty() {
            avd_dir.to_path_buf()
        } else {
            PathBuf::from(path_str.trim())
        };

        let config_path = avd_path.join("config.ini");
        let mut info = AvdInfo {
            name: name.to_string(),
            path: avd_path.clone(),
            display_name: None,
            tag: String::new(),
            target: String::new(),
            abi: String::new(),
            device_name: None,
            snapshots: Vec::new(),
        };

        if config_path.exists() {
            let config_content = tokio::fs::read_to_string(&config_path).await?;
            let mut config = Ini::new();
            config.read(config_content).map_err(AvdError::Parse)?;

            info.display_name = config.get("default", "avd.ini.displayname");
            info.tag = config.get("default", "tag.id").unwrap_or_default();
            info.target = config.get("default", "image.sysdir.1").unwrap_or_default();
            info.abi = config.get("default", "abi.type").unwrap_or_default();
            info.device_name = config.get("default", "hw.device.name");
        } else {
            debug!("No config.ini for AVD {}", name);
        }

        info.snapshots = discover_snapshots(&avd_path).await?;
        Ok(info)
    }
}
