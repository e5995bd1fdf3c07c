//! BLE HID keyboard report (boot protocol compatible) and the chord
//! presets the device sends.
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Modifier bitfield values.
pub mod modifiers {
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_ALT: u8 = 0x40;
}

/// Key usage codes (Keyboard/Keypad page).
pub mod keycodes {
    pub const KEY_A: u8 = 0x04;
    pub const KEY_E: u8 = 0x08;
    pub const KEY_H: u8 = 0x0B;
    pub const KEY_F1: u8 = 0x3A;
    pub const KEY_RIGHT_ARROW: u8 = 0x4F;
    pub const KEY_LEFT_ARROW: u8 = 0x50;
}

/// Standard boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// A report holding one key plus a modifier set. `key` of 0 holds
    /// only the modifiers.
    pub const fn chord(modifier: u8, key: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [key, 0, 0, 0, 0, 0],
        }
    }

    /// Serialise into a byte slice for transmission.
    /// Returns the number of bytes written (always 8 on success).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release report).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Hold timing for one chord send.
///
/// Different host applications need different key-hold timing before a
/// chord registers, so the same logical shortcut exists in several
/// timing variants. A stage with a zero duration is skipped entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChordTiming {
    /// Hold the modifiers alone before adding the key (ms).
    pub lead_hold_ms: u32,
    /// Hold modifiers + key together (ms).
    pub key_hold_ms: u32,
    /// Drop back to modifiers alone before releasing everything (ms).
    pub tail_hold_ms: u32,
    /// Pause after the final release report (ms).
    pub settle_ms: u32,
}

impl ChordTiming {
    /// Plain tap: key down for 200 ms, then release.
    pub const TAP: Self = Self {
        lead_hold_ms: 0,
        key_hold_ms: 200,
        tail_hold_ms: 0,
        settle_ms: 0,
    };

    /// Phased chord: modifiers first, then the key, then modifiers
    /// alone again before release. Timing-sensitive hosts (Google Meet)
    /// register this more reliably than a plain tap.
    pub const PHASED: Self = Self {
        lead_hold_ms: 50,
        key_hold_ms: 50,
        tail_hold_ms: 50,
        settle_ms: 0,
    };

    /// Sequential press: modifiers held, key added, everything released
    /// at once with a settle pause.
    pub const SEQUENTIAL: Self = Self {
        lead_hold_ms: 50,
        key_hold_ms: 100,
        tail_hold_ms: 0,
        settle_ms: 50,
    };

    /// Very short timing, closest to a real keypress.
    pub const FAST: Self = Self {
        lead_hold_ms: 0,
        key_hold_ms: 50,
        tail_hold_ms: 0,
        settle_ms: 25,
    };

    /// Medium hold used with right-hand modifiers.
    pub const RIGHT_HAND: Self = Self {
        lead_hold_ms: 0,
        key_hold_ms: 100,
        tail_hold_ms: 0,
        settle_ms: 50,
    };
}

/// A complete keyboard action: modifier set, key, and hold timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chord {
    pub modifier: u8,
    pub key: u8,
    pub timing: ChordTiming,
}

impl Chord {
    pub const LEFT_ARROW: Self = Self {
        modifier: 0,
        key: keycodes::KEY_LEFT_ARROW,
        timing: ChordTiming::TAP,
    };

    pub const RIGHT_ARROW: Self = Self {
        modifier: 0,
        key: keycodes::KEY_RIGHT_ARROW,
        timing: ChordTiming::TAP,
    };

    /// Ctrl+Shift+F1 - telephony app shortcut on the left button.
    pub const CTRL_SHIFT_F1: Self = Self {
        modifier: modifiers::LEFT_CTRL | modifiers::LEFT_SHIFT,
        key: keycodes::KEY_F1,
        timing: ChordTiming::TAP,
    };

    /// Ctrl+E - secondary app shortcut.
    pub const CTRL_E: Self = Self {
        modifier: modifiers::LEFT_CTRL,
        key: keycodes::KEY_E,
        timing: ChordTiming::TAP,
    };

    /// Ctrl+Alt+H - conferencing mute chord, phased timing.
    pub const CTRL_ALT_H: Self = Self {
        modifier: modifiers::LEFT_CTRL | modifiers::LEFT_ALT,
        key: keycodes::KEY_H,
        timing: ChordTiming::PHASED,
    };

    /// Ctrl+Alt+H alternative: sequential key presses.
    pub const CTRL_ALT_H_SEQUENTIAL: Self = Self {
        modifier: modifiers::LEFT_CTRL | modifiers::LEFT_ALT,
        key: keycodes::KEY_H,
        timing: ChordTiming::SEQUENTIAL,
    };

    /// Ctrl+Alt+H alternative: fast timing.
    pub const CTRL_ALT_H_FAST: Self = Self {
        modifier: modifiers::LEFT_CTRL | modifiers::LEFT_ALT,
        key: keycodes::KEY_H,
        timing: ChordTiming::FAST,
    };

    /// Ctrl+Alt+H alternative: right-hand modifiers.
    pub const CTRL_ALT_H_RIGHT: Self = Self {
        modifier: modifiers::RIGHT_CTRL | modifiers::RIGHT_ALT,
        key: keycodes::KEY_H,
        timing: ChordTiming::RIGHT_HAND,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serialize_layout() {
        let report = KeyboardReport::chord(
            modifiers::LEFT_CTRL | modifiers::LEFT_SHIFT,
            keycodes::KEY_F1,
        );
        let mut buf = [0u8; 8];
        assert_eq!(report.serialize(&mut buf), 8);
        assert_eq!(buf, [0x03, 0x00, 0x3A, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn report_serialize_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(KeyboardReport::empty().serialize(&mut buf), 0);
    }

    #[test]
    fn empty_report_releases_everything() {
        let report = KeyboardReport::empty();
        assert!(report.is_empty());
        let mut buf = [0xFFu8; 8];
        report.serialize(&mut buf);
        assert_eq!(buf, [0u8; 8]);
    }

    #[test]
    fn modifier_only_report_is_not_empty() {
        assert!(!KeyboardReport::chord(modifiers::LEFT_ALT, 0).is_empty());
    }

    #[test]
    fn chord_presets_keep_reference_timings() {
        assert_eq!(Chord::CTRL_SHIFT_F1.timing.key_hold_ms, 200);
        assert_eq!(Chord::CTRL_ALT_H.timing, ChordTiming::PHASED);
        assert_eq!(Chord::CTRL_ALT_H_SEQUENTIAL.timing.key_hold_ms, 100);
        assert_eq!(Chord::CTRL_ALT_H_FAST.timing.settle_ms, 25);
        assert_eq!(
            Chord::CTRL_ALT_H_RIGHT.modifier,
            modifiers::RIGHT_CTRL | modifiers::RIGHT_ALT
        );
    }
}
