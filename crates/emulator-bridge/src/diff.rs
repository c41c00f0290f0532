//! Device List Diffing
//!
//! Compares two polls of the device list by key and equality.

use std::collections::HashMap;

use crate::device::{Device, DeviceKey};

/// Changes between two device lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceListDiff {
    /// Devices whose key wasn't in the previous list, in current order
    pub added: Vec<Device>,
    /// Keys no longer present, in previous order
    pub removed: Vec<DeviceKey>,
    /// Devices present in both lists that are no longer equal, in current order
    pub changed: Vec<Device>,
}

impl DeviceListDiff {
    pub fn between(previous: &[Device], current: &[Device]) -> Self {
        let before: HashMap<&DeviceKey, &Device> =
            previous.iter().map(|device| (device.key(), device)).collect();
        let after: HashMap<&DeviceKey, &Device> =
            current.iter().map(|device| (device.key(), device)).collect();

        let mut diff = Self::default();

        for device in current {
            match before.get(device.key()) {
                None => diff.added.push(device.clone()),
                Some(old) if *old != device => diff.changed.push(device.clone()),
                Some(_) => {}
            }
        }

        diff.removed = previous
            .iter()
            .filter(|device| !after.contains_key(device.key()))
            .map(|device| device.key().clone())
            .collect();

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}
