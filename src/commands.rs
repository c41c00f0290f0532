//! CLI commands for devtarget
//! 
//! Listing devices with their launch targets, and printing the emulator
//! command line for one of those targets.

use std::path::{Path, PathBuf};
use anyhow::Result;
use serde::Serialize;
use tracing::info;

use devtarget_core::DevtargetError;
use devtarget_emulator_bridge::{emulator, AvdManager, Device, EmulatorOptions, Target};

/// One device and the targets it offers
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    /// The device
    pub device: Device,
    /// Targets in presentation order
    pub targets: Vec<Target>,
    /// Position of the default target
    pub default_index: usize,
}

impl DeviceReport {
    /// Resolve the targets of `device`
    pub fn new(device: Device) -> Self {
        let resolved = device.resolved_targets();
        Self {
            default_index: resolved.default_index(),
            targets: resolved.into_targets(),
            device,
        }
    }

    /// Human readable listing
    pub fn render(&self) -> String {
        let mut out = format!("{} [{}]\n", self.device.name(), self.device.key());
        for (i, target) in self.targets.iter().enumerate() {
            let marker = if i == self.default_index { '*' } else { ' ' };
            out.push_str(&format!("  {} {}: {}\n", marker, i, target.label()));
        }
        out
    }
}

/// List AVDs with their targets
pub struct TargetsCommand {
    /// AVD home directory
    pub avd_home: PathBuf,
    /// Offer cold boot and snapshot targets
    pub snapshots_enabled: bool,
    /// Print JSON instead of text
    pub json: bool,
}

impl TargetsCommand {
    /// Discover devices and resolve their targets
    pub async fn collect(&self) -> Result<Vec<DeviceReport>> {
        let manager = AvdManager::new(self.avd_home.clone());
        let devices = manager.list_devices(self.snapshots_enabled).await?;
        Ok(devices.into_iter().map(DeviceReport::new).collect())
    }

    /// Execute the command, printing to stdout
    pub async fn execute(&self) -> Result<()> {
        let reports = self.collect().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else if reports.is_empty() {
            println!("No AVDs configured in {}", self.avd_home.display());
        } else {
            for report in &reports {
                print!("{}", report.render());
            }
        }

        Ok(())
    }
}

/// Print the emulator invocation for one target of an AVD
pub struct BootArgsCommand {
    /// AVD home directory
    pub avd_home: PathBuf,
    /// Android SDK, used to locate the emulator binary
    pub sdk_path: Option<PathBuf>,
    /// AVD name
    pub avd: String,
    /// Target index, or the default target when absent
    pub target_index: Option<usize>,
    /// Offer cold boot and snapshot targets
    pub snapshots_enabled: bool,
}

impl BootArgsCommand {
    /// Build the emulator command line
    pub async fn command_line(&self) -> Result<Vec<String>> {
        let manager = AvdManager::new(self.avd_home.clone());
        let avd = manager.find_avd(&self.avd).await?;
        let resolved = avd.to_device(self.snapshots_enabled)?.resolved_targets();

        let target = match self.target_index {
            Some(i) => resolved
                .targets()
                .get(i)
                .ok_or_else(|| DevtargetError::NotFound(format!("{} has no target {}", self.avd, i)))?,
            None => resolved.default_target(),
        };

        info!("Boot arguments for {} ({})", avd.name, target.label());

        let options = EmulatorOptions::for_target(target, &avd.name)
            .ok_or_else(|| DevtargetError::InvalidState(format!("{} is already running", self.avd)))?;

        let program = self
            .sdk_path
            .as_deref()
            .map(emulator::emulator_path)
            .unwrap_or_else(|| Path::new("emulator").to_path_buf());

        let mut line = vec![program.display().to_string()];
        line.extend(options.to_args());
        Ok(line)
    }

    /// Execute the command, printing to stdout
    pub async fn execute(&self) -> Result<()> {
        println!("{}", self.command_line().await?.join(" "));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_avd(home: &Path, name: &str, snapshots: &[&str]) {
        let avd_dir = home.join(format!("{}.avd", name));
        std::fs::create_dir_all(&avd_dir).unwrap();
        std::fs::write(avd_dir.join("config.ini"), "tag.id=google_apis\n").unwrap();
        std::fs::write(
            home.join(format!("{}.ini", name)),
            format!("path={}\n", avd_dir.display()),
        )
        .unwrap();

        for snapshot in snapshots {
            let dir = avd_dir.join("snapshots").join(snapshot);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("snapshot.pb"), b"").unwrap();
        }
    }

    #[tokio::test]
    async fn test_targets_command_collects_reports() {
        let home = tempfile::tempdir().unwrap();
        write_avd(home.path(), "Pixel_6", &["clean"]);
        write_avd(home.path(), "Tablet", &[]);

        let command = TargetsCommand {
            avd_home: home.path().to_path_buf(),
            snapshots_enabled: true,
            json: false,
        };
        let reports = command.collect().await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].targets.len(), 3);
        assert_eq!(reports[0].default_index, 1);
        assert_eq!(
            reports[0].render(),
            format!(
                "Pixel 6 [{}]\n    0: Cold Boot\n  * 1: Quick Boot\n    2: clean\n",
                home.path().join("Pixel_6.avd").display()
            )
        );
        assert_eq!(reports[1].targets.len(), 1);
    }

    #[tokio::test]
    async fn test_boot_args_for_snapshot_target() {
        let home = tempfile::tempdir().unwrap();
        write_avd(home.path(), "Pixel_6", &["clean"]);

        let command = BootArgsCommand {
            avd_home: home.path().to_path_buf(),
            sdk_path: None,
            avd: "Pixel_6".into(),
            target_index: Some(2),
            snapshots_enabled: true,
        };

        assert_eq!(
            command.command_line().await.unwrap(),
            ["emulator", "-avd", "Pixel_6", "-snapshot", "clean"]
        );
    }

    #[tokio::test]
    async fn test_boot_args_default_and_out_of_range() {
        let home = tempfile::tempdir().unwrap();
        write_avd(home.path(), "Pixel_6", &[]);

        let mut command = BootArgsCommand {
            avd_home: home.path().to_path_buf(),
            sdk_path: None,
            avd: "Pixel_6".into(),
            target_index: None,
            snapshots_enabled: true,
        };
        assert_eq!(command.command_line().await.unwrap(), ["emulator", "-avd", "Pixel_6"]);

        command.target_index = Some(5);
        let err = command.command_line().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DevtargetError>(),
            Some(DevtargetError::NotFound(_))
        ));
    }
}
