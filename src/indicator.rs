//! Status indicator contract.
//!
//! Color rendering lives outside the core: the LED strip driver
//! (feature `embedded`) implements this trait, and the controller only
//! states *what* should be shown. The reference patterns:
//!
//! - no call → off; call active → red when muted, green when live
//! - calibration → blue blink (untouched stage), magenta blink
//!   (touched stage)
//! - mode changes → short color flashes

use crate::input::touch::CalibrationPhase;

/// Transient flash patterns shown on a mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeFlash {
    /// Encoder switched to volume control (green double flash).
    VolumeMode,
    /// Encoder switched to arrow keys (orange double flash).
    NavigationMode,
    /// Push-to-talk enabled (blue double flash).
    PushToTalk,
    /// Toggle-mute restored (purple double flash).
    ToggleMute,
    /// Pairing mode (blue strobe).
    Pairing,
}

pub trait StatusIndicator {
    /// Show the steady call/mute status.
    fn call_status(&mut self, call_active: bool, muted: bool);

    /// Show the blink pattern for an in-progress calibration stage.
    fn calibration_stage(&mut self, phase: CalibrationPhase);

    /// Play a transient mode-change flash.
    fn mode_flash(&mut self, flash: ModeFlash);

    /// Adjust strip brightness (0-255).
    fn set_brightness(&mut self, brightness: u8);

    fn brightness(&self) -> u8;
}

/// Recording indicator for host tests.
pub struct MockIndicator {
    pub statuses: heapless::Vec<(bool, bool), 32>,
    pub flashes: heapless::Vec<ModeFlash, 8>,
    pub level: u8,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            statuses: heapless::Vec::new(),
            flashes: heapless::Vec::new(),
            level: 0,
        }
    }

    pub fn last_status(&self) -> Option<(bool, bool)> {
        self.statuses.last().copied()
    }
}

impl Default for MockIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicator for MockIndicator {
    fn call_status(&mut self, call_active: bool, muted: bool) {
        let _ = self.statuses.push((call_active, muted));
    }

    fn calibration_stage(&mut self, _phase: CalibrationPhase) {}

    fn mode_flash(&mut self, flash: ModeFlash) {
        let _ = self.flashes.push(flash);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.level = brightness;
    }

    fn brightness(&self) -> u8 {
        self.level
    }
}
