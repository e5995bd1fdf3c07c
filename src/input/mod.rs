//! Signal conditioning - turns noisy raw hardware readings into
//! discrete, classified events.
//!
//! Each conditioner is a small poll-driven state machine fed a raw
//! reading plus the current monotonic time in milliseconds. Nothing in
//! here touches hardware; the poll loop samples the pins/pads/counter
//! and passes the values in, which keeps every filter testable on the
//! host.

pub mod button;
pub mod encoder;
pub mod touch;

pub use button::{ButtonClassifier, ButtonEvent, ButtonTiming};
pub use encoder::{EncoderFilter, EncoderTuning, RotationDirection};
pub use touch::{CalibrationPhase, CalibrationProfile, TouchEvent, TouchProbe, TouchSensor};
