//! Persistent settings.
//!
//! The device stores a handful of small values in a namespaced
//! key-value store (NVS on the real hardware):
//!
//!   - `touch-settings` / `untouched`, `touched`, `touchThresh`
//!   - `led-settings`   / `brightness`
//!
//! The `KvStore` trait is the narrow contract the core needs; the
//! embedded implementation opens a read-only or read-write NVS session
//! per access, and `MemoryStore` backs host tests.

use log::warn;

use crate::input::touch::CalibrationProfile;

/// Namespaces and keys.
pub mod keys {
    pub const TOUCH_NAMESPACE: &str = "touch-settings";
    pub const TOUCH_UNTOUCHED: &str = "untouched";
    pub const TOUCH_TOUCHED: &str = "touched";
    pub const TOUCH_THRESHOLD: &str = "touchThresh";

    pub const LED_NAMESPACE: &str = "led-settings";
    pub const LED_BRIGHTNESS: &str = "brightness";
}

/// Namespaced key-value persistence contract.
///
/// Reads of absent keys yield `None`; writes report success as `bool`
/// (a failed write is logged by the caller and otherwise ignored -
/// settings loss degrades to defaults, never to a fault).
pub trait KvStore {
    fn get_u32(&mut self, namespace: &str, key: &str) -> Option<u32>;
    fn put_u32(&mut self, namespace: &str, key: &str, value: u32) -> bool;
    fn get_u8(&mut self, namespace: &str, key: &str) -> Option<u8>;
    fn put_u8(&mut self, namespace: &str, key: &str, value: u8) -> bool;
}

/// Load the touch calibration profile. Missing keys read as zero, so
/// an absent or partial profile comes back incomplete and triggers
/// recalibration.
pub fn load_touch_profile(store: &mut impl KvStore) -> CalibrationProfile {
    CalibrationProfile {
        untouched: store
            .get_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_UNTOUCHED)
            .unwrap_or(0),
        touched: store
            .get_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_TOUCHED)
            .unwrap_or(0),
        threshold: store
            .get_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_THRESHOLD)
            .unwrap_or(0),
    }
}

/// Persist the touch calibration profile.
pub fn save_touch_profile(store: &mut impl KvStore, profile: &CalibrationProfile) {
    let ok = store.put_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_UNTOUCHED, profile.untouched)
        && store.put_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_TOUCHED, profile.touched)
        && store.put_u32(keys::TOUCH_NAMESPACE, keys::TOUCH_THRESHOLD, profile.threshold);
    if !ok {
        warn!("failed to persist touch profile");
    }
}

/// Load the LED brightness, falling back to the given default.
pub fn load_brightness(store: &mut impl KvStore, default: u8) -> u8 {
    store
        .get_u8(keys::LED_NAMESPACE, keys::LED_BRIGHTNESS)
        .unwrap_or(default)
}

/// Persist the LED brightness.
pub fn save_brightness(store: &mut impl KvStore, brightness: u8) {
    if !store.put_u8(keys::LED_NAMESPACE, keys::LED_BRIGHTNESS, brightness) {
        warn!("failed to persist LED brightness");
    }
}

/// Fixed-capacity in-memory store for host tests.
pub struct MemoryStore {
    entries: heapless::FnvIndexMap<heapless::String<40>, u32, 16>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: heapless::FnvIndexMap::new(),
        }
    }

    fn full_key(namespace: &str, key: &str) -> heapless::String<40> {
        let mut s = heapless::String::new();
        let _ = s.push_str(namespace);
        let _ = s.push('/');
        let _ = s.push_str(key);
        s
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get_u32(&mut self, namespace: &str, key: &str) -> Option<u32> {
        self.entries.get(&Self::full_key(namespace, key)).copied()
    }

    fn put_u32(&mut self, namespace: &str, key: &str, value: u32) -> bool {
        self.entries
            .insert(Self::full_key(namespace, key), value)
            .is_ok()
    }

    fn get_u8(&mut self, namespace: &str, key: &str) -> Option<u8> {
        self.get_u32(namespace, key).map(|v| v as u8)
    }

    fn put_u8(&mut self, namespace: &str, key: &str, value: u8) -> bool {
        self.put_u32(namespace, key, value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_roundtrip() {
        let mut store = MemoryStore::new();
        let profile = CalibrationProfile {
            untouched: 40_000,
            touched: 12_000,
            threshold: 26_000,
        };
        save_touch_profile(&mut store, &profile);
        assert_eq!(load_touch_profile(&mut store), profile);
    }

    #[test]
    fn missing_profile_reads_incomplete() {
        let mut store = MemoryStore::new();
        let profile = load_touch_profile(&mut store);
        assert!(!profile.is_complete());
    }

    #[test]
    fn brightness_roundtrip_with_default() {
        let mut store = MemoryStore::new();
        assert_eq!(load_brightness(&mut store, 10), 10);
        save_brightness(&mut store, 200);
        assert_eq!(load_brightness(&mut store, 10), 200);
    }
}
