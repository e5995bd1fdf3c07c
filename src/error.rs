//! Unified error type for callknob.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Expected, non-fatal outcomes (no client connected, sensor not yet
//! calibrated) are *not* errors; they surface as `bool`/`Option` at the
//! call site and are logged there.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // BLE
    /// The BLE stack could not be initialised.
    BleInit,

    /// Advertising could not be (re)started.
    Advertising,

    // Storage
    /// NVS namespace open or read/write failed.
    Storage,

    // Hardware
    /// Touch pad peripheral setup failed.
    TouchSetup,

    /// GPIO configuration failed.
    Gpio,

    // Console
    /// Console input was not a recognised command.
    Console(crate::console::ParseError),
}

impl From<crate::console::ParseError> for Error {
    fn from(e: crate::console::ParseError) -> Self {
        Error::Console(e)
    }
}
