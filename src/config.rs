//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Device identity

/// Manufacturer string reported over BLE.
pub const DEVICE_MANUFACTURER: &str = "Custom Gadgets Inc.";

/// Human-readable device name used for advertising.
pub const DEVICE_NAME: &str = "ESP32 Mute Control";

/// Vendor ID for hobbyist projects.
pub const DEVICE_VID: u16 = 0xEDFE;
pub const DEVICE_PID: u16 = 0xDEC0;

/// Device version 1.00 (BCD).
pub const DEVICE_VERSION: u16 = 0x0100;

/// BLE appearance: keyboard/pointer HID.
pub const BLE_APPEARANCE: u16 = 0x03C0;

/// Maximum simultaneous BLE client connections.
pub const MAX_BLE_CONNECTIONS: usize = 3;

// Input timing

/// Button debounce window (ms).
pub const DEBOUNCE_MS: u64 = 50;

/// Hold time before a press classifies as a long press (ms).
pub const LONG_PRESS_MS: u64 = 700;

/// Window inside which a second click becomes a double click (ms).
pub const DOUBLE_CLICK_MS: u64 = 300;

/// The encoder's click button uses a longer double-click window than
/// the standalone buttons (500 ms instead of 300 ms).
pub const ENCODER_DOUBLE_CLICK_MS: u64 = 500;

// Rotary encoder conditioning

/// Consecutive same-direction readings needed to accept a direction.
pub const ENCODER_DIRECTION_CONSISTENCY: u8 = 2;

/// Notches needed to emit one rotation event.
pub const ENCODER_NOTCH_THRESHOLD: u8 = 2;

/// Idle time after which the notch accumulator resets (ms).
pub const ENCODER_RESET_TIMEOUT_MS: u64 = 500;

// Touch sensor

/// Touch state debounce window (ms).
pub const TOUCH_DEBOUNCE_MS: u64 = 50;

/// Settle time the user gets before each calibration stage samples (ms).
pub const CALIBRATION_SETTLE_MS: u64 = 5000;

/// Number of raw samples averaged per calibration stage.
pub const CALIBRATION_SAMPLES: u32 = 200;

/// Spacing between calibration samples (ms).
pub const CALIBRATION_SAMPLE_SPACING_MS: u32 = 5;

// Report timing

/// Width of the drop ("hook-flash") pulse in the telephony report (ms).
pub const DROP_PULSE_MS: u32 = 100;

/// Width of a consumer-control pulse (ms).
pub const CONSUMER_PULSE_MS: u32 = 50;

/// Main loop poll interval (ms).
pub const POLL_INTERVAL_MS: u32 = 10;

// LED strip

/// Default LED brightness when nothing is stored (0-255).
pub const LED_BRIGHTNESS_DEFAULT: u8 = 10;

/// Number of pixels on the strip.
pub const LED_PIXEL_COUNT: usize = 9;

// GPIO pin assignments (ESP32-S3 defaults)

/// Left button - telephony shortcut / hangup long press.
pub const LEFT_BUTTON_PIN: u8 = 13;

/// Right button - conferencing shortcut.
pub const RIGHT_BUTTON_PIN: u8 = 14;

/// Rotary encoder A/B and click button.
pub const ENCODER_PIN_A: u8 = 5;
pub const ENCODER_PIN_B: u8 = 6;
pub const ENCODER_BUTTON_PIN: u8 = 7;

/// Capacitive touch pad number.
pub const TOUCH_PAD: u8 = 4;

/// LED strip data/clock pins (DotStar-style two-wire strip).
pub const LED_DATA_PIN: u8 = 11;
pub const LED_CLOCK_PIN: u8 = 12;

/// Console baud rate.
pub const SERIAL_BAUD: u32 = 115_200;
