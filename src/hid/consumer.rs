//! Consumer Control report - volume and system mute.
//!
//! Unlike a generic media keyboard this device exposes only three
//! usages, packed as a 1-byte bitfield (one bit per usage, matching
//! the report map). Consumer controls are edge-triggered on the host,
//! so every action is sent as a brief pulse: set bit, short delay,
//! clear to zero.

/// Consumer report size in bytes.
pub const CONSUMER_REPORT_SIZE: usize = 1;

/// Bit assignments within the report byte.
pub const CONSUMER_VOLUME_UP: u8 = 0x01;
pub const CONSUMER_VOLUME_DOWN: u8 = 0x02;
pub const CONSUMER_MUTE: u8 = 0x04;

/// Consumer Control report bitfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    pub bits: u8,
}

impl ConsumerReport {
    /// All bits clear - the release half of a pulse.
    pub const fn release() -> Self {
        Self { bits: 0 }
    }

    pub const fn volume_up() -> Self {
        Self {
            bits: CONSUMER_VOLUME_UP,
        }
    }

    pub const fn volume_down() -> Self {
        Self {
            bits: CONSUMER_VOLUME_DOWN,
        }
    }

    pub const fn mute() -> Self {
        Self {
            bits: CONSUMER_MUTE,
        }
    }

    pub fn to_byte(self) -> u8 {
        self.bits
    }

    pub fn is_release(self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_assignments() {
        assert_eq!(ConsumerReport::volume_up().to_byte(), 0x01);
        assert_eq!(ConsumerReport::volume_down().to_byte(), 0x02);
        assert_eq!(ConsumerReport::mute().to_byte(), 0x04);
    }

    #[test]
    fn release_is_all_zero() {
        assert!(ConsumerReport::release().is_release());
        assert_eq!(ConsumerReport::release().to_byte(), 0x00);
    }
}
