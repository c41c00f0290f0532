//! devtarget - launch targets for Android virtual devices
//! 
//! Discovers AVDs and their snapshots and works out which launch
//! targets a device picker should offer for each one.
//! 
//! ## Architecture
//! 
//! - `devtarget-core`: configuration and errors
//! - `devtarget-emulator-bridge`: device model, snapshot and AVD
//!   discovery, target resolution, emulator boot arguments

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use devtarget_core as core;
pub use devtarget_emulator_bridge as emulator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use devtarget_core::config::AppConfig;
    pub use devtarget_emulator_bridge::{
        resolve_targets, AvdManager, Device, DeviceKey, EmulatorOptions, Snapshot, Target,
    };
}
