//! Android Emulator Bridge
//!
//! Models virtual and connected devices and resolves the launch targets
//! each one offers in a device picker: cold boot, quick boot, boot from
//! a snapshot, or attach to the running instance.

pub mod avd;
pub mod connection;
pub mod device;
pub mod diff;
pub mod emulator;
pub mod snapshot;
pub mod target;

pub use avd::{AvdError, AvdInfo, AvdManager};
pub use connection::ConnectionTimes;
pub use device::{
    CompatibilityState, Device, DeviceConfig, DeviceError, DeviceKey, DeviceKind, DeviceType,
    LaunchCompatibility, PlatformDevice, VirtualDeviceName,
};
pub use diff::DeviceListDiff;
pub use emulator::EmulatorOptions;
pub use snapshot::{discover_snapshots, Snapshot};
pub use target::{resolve_targets, ResolvedTargets, Target};
