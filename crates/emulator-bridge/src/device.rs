//! Device Types and Identity
//!
//! Virtual and connected devices as shown in a device picker. A device
//! is an immutable value: a refresh builds a new one from a
//! [`DeviceConfig`], and equality tells a picker whether anything
//! changed between two polls.

use std::fmt;
use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::connection::ConnectionTimes;
use crate::snapshot::Snapshot;
use crate::target::{resolve_targets, ResolvedTargets, Target};

/// Device construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("Device name is empty")]
    EmptyName,
    #[error("Device key is empty")]
    EmptyKey,
    #[error("Connected device {0} has no connection time")]
    NotConnected(DeviceKey),
    #[error("Snapshot listed twice: {0:?}")]
    DuplicateSnapshot(PathBuf),
}

/// Stable identifier of a device across refresh cycles
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKey {
    /// AVD directory, reported by emulators that support `avd path`
    Path(PathBuf),
    /// AVD name, reported by older emulators
    Name(String),
    /// ADB serial number
    Serial(String),
}

impl DeviceKey {
    fn is_empty(&self) -> bool {
        match self {
            DeviceKey::Path(path) => path.as_os_str().is_empty(),
            DeviceKey::Name(value) | DeviceKey::Serial(value) => value.trim().is_empty(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKey::Path(path) => write!(f, "{}", path.display()),
            DeviceKey::Name(name) => f.write_str(name),
            DeviceKey::Serial(serial) => f.write_str(serial),
        }
    }
}

/// AVD name of a device known to the AVD manager.
///
/// Emulators older than 30.0.18 can't report their AVD path, only this
/// name, so it is kept alongside the path key to match them up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VirtualDeviceName(pub String);

impl fmt::Display for VirtualDeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Form factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    #[default]
    Phone,
    Wear,
    Tv,
}

impl DeviceType {
    /// Map a system image `tag.id` to a form factor
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "android-wear" | "wear" => DeviceType::Wear,
            "android-tv" | "google-tv" => DeviceType::Tv,
            _ => DeviceType::Phone,
        }
    }
}

/// Launch compatibility level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityState {
    #[default]
    Ok,
    Warning,
    Error,
}

/// Whether the current project can be launched on a device, and why not
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaunchCompatibility {
    pub state: CompatibilityState,
    pub reason: Option<String>,
}

impl LaunchCompatibility {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn warning(reason: impl Into<String>) -> Self {
        Self {
            state: CompatibilityState::Warning,
            reason: Some(reason.into()),
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            state: CompatibilityState::Error,
            reason: Some(reason.into()),
        }
    }
}

/// Underlying platform device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlatformDevice {
    /// An AVD that can be launched
    Avd { name: String, path: PathBuf },
    /// A device visible to ADB
    Running { serial: String },
}

/// Variant specific device state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceKind {
    /// An emulator, running or not
    Virtual {
        name_key: Option<VirtualDeviceName>,
        snapshots: Vec<Snapshot>,
        snapshots_enabled: bool,
    },
    /// A running device with no AVD record, e.g. a phone over USB
    Connected,
}

/// Everything needed to build a [`Device`]
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub name: String,
    pub device_type: DeviceType,
    pub launch_compatibility: LaunchCompatibility,
    pub key: DeviceKey,
    pub connection_time: Option<DateTime<Utc>>,
    pub platform_device: PlatformDevice,
    pub kind: DeviceKind,
}

/// A device in the picker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Device {
    name: String,
    device_type: DeviceType,
    launch_compatibility: LaunchCompatibility,
    key: DeviceKey,
    connection_time: Option<DateTime<Utc>>,
    platform_device: PlatformDevice,
    kind: DeviceKind,
}

impl Device {
    /// Validate a configuration and freeze it into a device
    pub fn new(config: DeviceConfig) -> Result<Self, DeviceError> {
        if config.name.trim().is_empty() {
            return Err(DeviceError::EmptyName);
        }

        if config.key.is_empty() {
            return Err(DeviceError::EmptyKey);
        }

        match &config.kind {
            DeviceKind::Connected if config.connection_time.is_none() => {
                return Err(DeviceError::NotConnected(config.key.clone()));
            }
            DeviceKind::Virtual { snapshots, .. } => {
                for (i, snapshot) in snapshots.iter().enumerate() {
                    if snapshots[..i].contains(snapshot) {
                        return Err(DeviceError::DuplicateSnapshot(
                            snapshot.directory().to_path_buf(),
                        ));
                    }
                }
            }
            DeviceKind::Connected => {}
        }

        Ok(Self {
            name: config.name,
            device_type: config.device_type,
            launch_compatibility: config.launch_compatibility,
            key: config.key,
            connection_time: config.connection_time,
            platform_device: config.platform_device,
            kind: config.kind,
        })
    }

    /// Merge a running device with the AVD record it was started from.
    ///
    /// Identity (name, key, type, snapshots, name key) comes from the AVD
    /// record when there is one; compatibility and the platform handle
    /// always come from the running device.
    pub fn new_connected_device(
        connected: &Device,
        times: &mut ConnectionTimes,
        virtual_device: Option<&Device>,
        snapshots_enabled: bool,
    ) -> Result<Self, DeviceError> {
        let identity = virtual_device.unwrap_or(connected);
        let name_key = virtual_device.and_then(|device| device.name_key().cloned());
        let key = identity.key.clone();

        Device::new(DeviceConfig {
            name: identity.name.clone(),
            device_type: identity.device_type,
            launch_compatibility: connected.launch_compatibility.clone(),
            connection_time: Some(times.get(&key)),
            key,
            platform_device: connected.platform_device.clone(),
            kind: DeviceKind::Virtual {
                name_key,
                snapshots: identity.snapshots().to_vec(),
                snapshots_enabled,
            },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn launch_compatibility(&self) -> &LaunchCompatibility {
        &self.launch_compatibility
    }

    pub fn key(&self) -> &DeviceKey {
        &self.key
    }

    pub fn connection_time(&self) -> Option<DateTime<Utc>> {
        self.connection_time
    }

    pub fn platform_device(&self) -> &PlatformDevice {
        &self.platform_device
    }

    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    /// Secondary AVD name key, for virtual devices known to the AVD manager
    pub fn name_key(&self) -> Option<&VirtualDeviceName> {
        match &self.kind {
            DeviceKind::Virtual { name_key, .. } => name_key.as_ref(),
            DeviceKind::Connected => None,
        }
    }

    /// Saved snapshots, in discovery order
    pub fn snapshots(&self) -> &[Snapshot] {
        match &self.kind {
            DeviceKind::Virtual { snapshots, .. } => snapshots,
            DeviceKind::Connected => &[],
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_time.is_some()
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, DeviceKind::Virtual { .. })
    }

    /// Targets offered by this device, with the default marked
    pub fn resolved_targets(&self) -> ResolvedTargets {
        match &self.kind {
            DeviceKind::Virtual { snapshots, snapshots_enabled, .. } => {
                resolve_targets(&self.key, self.is_connected(), *snapshots_enabled, snapshots)
            }
            DeviceKind::Connected => resolve_targets(&self.key, true, true, &[]),
        }
    }

    /// Targets offered by this device, in presentation order
    pub fn targets(&self) -> Vec<Target> {
        self.resolved_targets().into_targets()
    }

    /// Target used by implicit run actions
    pub fn default_target(&self) -> Target {
        self.resolved_targets().default_target().clone()
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        match &self.platform_device {
            PlatformDevice::Running { serial } if !self.is_virtual() => {
                format!("{} ({})", self.name, serial)
            }
            _ => self.name.clone(),
        }
    }
}
