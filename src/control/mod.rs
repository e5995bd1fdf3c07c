//! Device state and report dispatch.
//!
//! [`DeviceController`] holds the authoritative device state and turns
//! conditioned input events into outbound reports; [`Dispatcher`] owns
//! the transport and the per-report-kind send sequences (chord timing,
//! consumer pulses, the drop hook-flash).

pub mod device;
pub mod dispatch;

pub use device::{DeviceController, DeviceState};
pub use dispatch::Dispatcher;
