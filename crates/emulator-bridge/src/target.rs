//! Launch Targets
//!
//! The ways a device can be started or attached to, and the decision
//! table that picks which of them a device offers.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::device::DeviceKey;
use crate::snapshot::Snapshot;

/// A selectable way to start or attach to a device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// Boot without loading any snapshot
    ColdBoot { key: DeviceKey },
    /// Boot from the quick boot snapshot
    QuickBoot { key: DeviceKey },
    /// Attach to the instance that is already running
    RunningDevice { key: DeviceKey },
    /// Boot from a named snapshot
    BootWithSnapshot { key: DeviceKey, snapshot: PathBuf },
}

impl Target {
    /// Key of the device this target belongs to
    pub fn device_key(&self) -> &DeviceKey {
        match self {
            Target::ColdBoot { key }
            | Target::QuickBoot { key }
            | Target::RunningDevice { key }
            | Target::BootWithSnapshot { key, .. } => key,
        }
    }

    /// Snapshot directory, for snapshot targets
    pub fn snapshot(&self) -> Option<&Path> {
        match self {
            Target::BootWithSnapshot { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Whether selecting this target starts an emulator
    pub fn boots(&self) -> bool {
        !matches!(self, Target::RunningDevice { .. })
    }

    /// Menu text for the target
    pub fn label(&self) -> String {
        match self {
            Target::ColdBoot { .. } => "Cold Boot".to_string(),
            Target::QuickBoot { .. } => "Quick Boot".to_string(),
            Target::RunningDevice { .. } => "Running".to_string(),
            Target::BootWithSnapshot { snapshot, .. } => snapshot
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| snapshot.display().to_string()),
        }
    }
}

/// Ordered targets of a device with exactly one of them marked default
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedTargets {
    targets: Vec<Target>,
    default_index: usize,
}

impl ResolvedTargets {
    fn single(target: Target) -> Self {
        Self {
            targets: vec![target],
            default_index: 0,
        }
    }

    /// All targets, in presentation order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The target used by implicit run actions
    pub fn default_target(&self) -> &Target {
        &self.targets[self.default_index]
    }

    /// Position of the default target in [`Self::targets`]
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Whether `target` is the default one
    pub fn is_default(&self, target: &Target) -> bool {
        self.default_target() == target
    }

    pub fn into_targets(self) -> Vec<Target> {
        self.targets
    }
}

/// Compute the targets a device offers.
///
/// With snapshot mode off a device only ever offers quick boot, even
/// while connected. With it on, a connected device can only be attached
/// to; a disconnected one offers cold boot, quick boot, then one target
/// per snapshot in registry order. Quick boot is the default whenever
/// the device is not attached to.
pub fn resolve_targets(
    key: &DeviceKey,
    connected: bool,
    snapshots_enabled: bool,
    snapshots: &[Snapshot],
) -> ResolvedTargets {
    if !snapshots_enabled {
        return ResolvedTargets::single(Target::QuickBoot { key: key.clone() });
    }

    if connected {
        return ResolvedTargets::single(Target::RunningDevice { key: key.clone() });
    }

    if snapshots.is_empty() {
        return ResolvedTargets::single(Target::QuickBoot { key: key.clone() });
    }

    let mut targets = Vec::with_capacity(2 + snapshots.len());
    targets.push(Target::ColdBoot { key: key.clone() });
    targets.push(Target::QuickBoot { key: key.clone() });
    targets.extend(snapshots.iter().map(|snapshot| Target::BootWithSnapshot {
        key: key.clone(),
        snapshot: snapshot.directory().to_path_buf(),
    }));

    ResolvedTargets {
        targets,
        default_index: 1,
    }
}
