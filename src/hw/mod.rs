//! ESP32 hardware collaborators: touch pad probe, quadrature counter,
//! LED strip indicator, NVS-backed settings.

pub mod encoder;
pub mod led;
pub mod nvs;
pub mod touch;

/// Monotonic milliseconds since boot.
pub fn now_ms() -> u64 {
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 / 1000 }
}
