//! Connection Times
//!
//! Remembers when each device was first seen connected so a device keeps
//! the same connection time across polls.

use std::collections::{HashMap, HashSet};
use chrono::{DateTime, Utc};

use crate::device::DeviceKey;

/// First-seen connection time per device key
#[derive(Debug, Clone, Default)]
pub struct ConnectionTimes {
    times: HashMap<DeviceKey, DateTime<Utc>>,
}

impl ConnectionTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection time of `key`, recording now if it wasn't seen before
    pub fn get(&mut self, key: &DeviceKey) -> DateTime<Utc> {
        *self.times.entry(key.clone()).or_insert_with(Utc::now)
    }

    /// Connection time of `key` if it was seen before
    pub fn peek(&self, key: &DeviceKey) -> Option<DateTime<Utc>> {
        self.times.get(key).copied()
    }

    /// Record an explicit connection time from a connection feed.
    /// An earlier recorded time wins.
    pub fn record(&mut self, key: DeviceKey, at: DateTime<Utc>) {
        self.times
            .entry(key)
            .and_modify(|existing| *existing = (*existing).min(at))
            .or_insert(at);
    }

    /// Forget every key that is not in `connected`
    pub fn retain_keys<'a>(&mut self, connected: impl IntoIterator<Item = &'a DeviceKey>) {
        let keep: HashSet<&DeviceKey> = connected.into_iter().collect();
        self.times.retain(|key, _| keep.contains(key));
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn serial(s: &str) -> DeviceKey {
        DeviceKey::Serial(s.to_string())
    }

    #[test]
    fn test_get_is_stable() {
        let mut times = ConnectionTimes::new();
        let first = times.get(&serial("emulator-5554"));
        let second = times.get(&serial("emulator-5554"));
        assert_eq!(first, second);
        assert_eq!(times.peek(&serial("emulator-5554")), Some(first));
        assert_eq!(times.peek(&serial("emulator-5556")), None);
    }

    #[test]
    fn test_record_keeps_earliest() {
        let mut times = ConnectionTimes::new();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        times.record(serial("a"), t0 + Duration::minutes(5));
        times.record(serial("a"), t0);
        times.record(serial("a"), t0 + Duration::minutes(10));

        assert_eq!(times.peek(&serial("a")), Some(t0));
    }

    #[test]
    fn test_retain_keys_forgets_disconnected() {
        let mut times = ConnectionTimes::new();
        times.get(&serial("a"));
        times.get(&serial("b"));

        let still_connected = [serial("b")];
        times.retain_keys(still_connected.iter());

        assert_eq!(times.len(), 1);
        assert!(times.peek(&serial("a")).is_none());
        assert!(times.peek(&serial("b")).is_some());
    }
}
