//! Emulator Boot Arguments
//!
//! Translates a launch target into the emulator command line that
//! starts it. Spawning the process is left to the caller.

use std::path::{Path, PathBuf};

use crate::snapshot::Snapshot;
use crate::target::Target;

/// Emulator launch options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmulatorOptions {
    /// AVD to boot
    pub avd: String,
    /// Skip loading the quick boot snapshot
    pub cold_boot: bool,
    /// Named snapshot to boot from
    pub snapshot: Option<String>,
    /// GPU mode (auto, host, swiftshader_indirect, etc.)
    pub gpu: Option<String>,
    /// Enable/disable window
    pub no_window: bool,
    /// Enable/disable boot animation
    pub no_boot_anim: bool,
    /// Port for console
    pub port: Option<u16>,
    /// Additional arguments
    pub extra_args: Vec<String>,
}

impl EmulatorOptions {
    /// Options that boot `avd` the way `target` asks for.
    ///
    /// Returns `None` for a running device target, which attaches
    /// instead of booting.
    pub fn for_target(target: &Target, avd: &str) -> Option<Self> {
        let mut options = Self {
            avd: avd.to_string(),
            ..Default::default()
        };

        match target {
            Target::RunningDevice { .. } => return None,
            Target::QuickBoot { .. } => {}
            Target::ColdBoot { .. } => options.cold_boot = true,
            Target::BootWithSnapshot { snapshot, .. } => {
                options.snapshot = Some(Snapshot::new(snapshot.clone()).name());
            }
        }

        Some(options)
    }

    /// Options for headless/CI environments
    pub fn headless(mut self) -> Self {
        self.gpu = Some("swiftshader_indirect".to_string());
        self.no_window = true;
        self.no_boot_anim = true;
        self
    }

    /// Convert to command line arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-avd".to_string(), self.avd.clone()];

        if self.cold_boot {
            args.push("-no-snapshot-load".to_string());
        }

        if let Some(ref snapshot) = self.snapshot {
            args.push("-snapshot".to_string());
            args.push(snapshot.clone());
        }

        if let Some(ref gpu) = self.gpu {
            args.push("-gpu".to_string());
            args.push(gpu.clone());
        }

        if self.no_window {
            args.push("-no-window".to_string());
        }

        if self.no_boot_anim {
            args.push("-no-boot-anim".to_string());
        }

        if let Some(port) = self.port {
            args.push("-port".to_string());
            args.push(port.to_string());
        }

        args.extend(self.extra_args.clone());

        args
    }
}

/// Path of the emulator executable inside an SDK
pub fn emulator_path(sdk_path: &Path) -> PathBuf {
    let emulator_dir = sdk_path.join("emulator");
    if cfg!(windows) {
        emulator_dir.join("emulator.exe")
    } else {
        emulator_dir.join("emulator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKey;

    fn key() -> DeviceKey {
        DeviceKey::Name("Pixel_6".into())
    }

    #[test]
    fn test_quick_boot_args() {
        let options = EmulatorOptions::for_target(&Target::QuickBoot { key: key() }, "Pixel_6").unwrap();
        assert_eq!(options.to_args(), ["-avd", "Pixel_6"]);
    }

    #[test]
    fn test_cold_boot_args() {
        let options = EmulatorOptions::for_target(&Target::ColdBoot { key: key() }, "Pixel_6").unwrap();
        assert_eq!(options.to_args(), ["-avd", "Pixel_6", "-no-snapshot-load"]);
    }

    #[test]
    fn test_snapshot_args() {
        let target = Target::BootWithSnapshot {
            key: key(),
            snapshot: PathBuf::from("/avd/Pixel_6.avd/snapshots/logged_in"),
        };
        let options = EmulatorOptions::for_target(&target, "Pixel_6").unwrap().headless();
        assert_eq!(
            options.to_args(),
            [
                "-avd", "Pixel_6",
                "-snapshot", "logged_in",
                "-gpu", "swiftshader_indirect",
                "-no-window",
                "-no-boot-anim",
            ]
        );
    }

    #[test]
    fn test_snapshot_without_name_uses_path() {
        let target = Target::BootWithSnapshot { key: key(), snapshot: PathBuf::from("/") };
        let options = EmulatorOptions::for_target(&target, "Pixel_6").unwrap();
        assert_eq!(options.snapshot.as_deref(), Some("/"));
        assert_eq!(options.to_args(), ["-avd", "Pixel_6", "-snapshot", "/"]);
    }

    #[test]
    fn test_running_device_does_not_boot() {
        assert!(EmulatorOptions::for_target(&Target::RunningDevice { key: key() }, "Pixel_6").is_none());
    }
}
