//! Emulator Snapshots
//!
//! Saved VM states an AVD can resume from, discovered from
//! `<avd>/snapshots/<name>/`.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshot directory name the emulator uses for quick boot
pub const QUICK_BOOT_SNAPSHOT: &str = "default_boot";

/// File present in every complete snapshot directory
pub const SNAPSHOT_PROTOBUF: &str = "snapshot.pb";

/// A saved virtual machine state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Snapshot {
    directory: PathBuf,
}

impl Snapshot {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Snapshot directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Snapshot name as the emulator's `-snapshot` flag expects it.
    /// Falls back to the full path when the directory has no final component.
    pub fn name(&self) -> String {
        self.directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.directory.display().to_string())
    }
}

/// List the snapshots saved for an AVD.
///
/// The quick boot snapshot is left out since the quick boot target
/// already covers it. Directories without a `snapshot.pb` are partial
/// saves and are skipped. Results are ordered by directory name.
pub async fn discover_snapshots(avd_path: &Path) -> std::io::Result<Vec<Snapshot>> {
    let snapshots_dir = avd_path.join("snapshots");

    match tokio::fs::metadata(&snapshots_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Ok(Vec::new()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    }

    let mut snapshots = Vec::new();
    let mut entries = tokio::fs::read_dir(&snapshots_dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let path = entry.path();
        if path.file_name().map(|n| n == QUICK_BOOT_SNAPSHOT).unwrap_or(false) {
            continue;
        }

        let complete = tokio::fs::metadata(path.join(SNAPSHOT_PROTOBUF))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !complete {
            debug!("Skipping incomplete snapshot {:?}", path);
            continue;
        }

        snapshots.push(Snapshot::new(path));
    }

    snapshots.sort();
    Ok(snapshots)
}
