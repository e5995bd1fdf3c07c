//! callknob - BLE telephony controller firmware.
//!
//! An ESP32 desk gadget that exposes itself as a multi-client BLE HID
//! headset/keyboard: a touch pad toggles (or push-to-talks) the call
//! mute, buttons send hang-up and conferencing shortcuts, and a rotary
//! encoder drives volume or slide navigation.
//!
//! The crate splits into a host-testable core - signal conditioning
//! ([`input`]), device state and dispatch ([`control`]), report types
//! ([`hid`]), transport/persistence/indicator contracts - and the
//! ESP32 glue behind the `embedded` feature (`ble`, `hw` and the
//! binary's poll loop).
//!
//! Host tests: `cargo test`

#![cfg_attr(not(any(test, feature = "embedded")), no_std)]

pub mod config;
pub mod console;
pub mod control;
pub mod error;
pub mod hid;
pub mod indicator;
pub mod input;
pub mod storage;
pub mod transport;

#[cfg(feature = "embedded")]
pub mod ble;
#[cfg(feature = "embedded")]
pub mod hw;

pub use control::{DeviceController, DeviceState};
pub use error::Error;
pub use transport::{HostFeedbackChannel, Transport};
