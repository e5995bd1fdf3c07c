//! BLE HID report map and report identifiers.
//!
//! The map defines:
//! 1. A headset that reports phone mute and drop state (Telephony page)
//! 2. An LED output report through which the host pushes mute/off-hook
//! 3. A boot-compatible keyboard report (arrows, key combinations)
//! 4. A consumer control report (volume up/down, mute)

pub const REPORT_ID_TELEPHONY: u8 = 0x01;
pub const REPORT_ID_LED_OUTPUT: u8 = 0x02;
pub const REPORT_ID_KEYBOARD: u8 = 0x03;
pub const REPORT_ID_CONSUMER: u8 = 0x04;

/// HID Report Descriptor for the composite device.
pub const REPORT_MAP: &[u8] = &[
    // - Telephony collection -
    0x05, 0x0B, // Usage Page (Telephony Devices)
    0x09, 0x05, // Usage (Headset)
    0xA1, 0x01, // Collection (Application)
    0x85, REPORT_ID_TELEPHONY, //   Report ID (1)
    0x25, 0x01, //   Logical Maximum (1)
    0x15, 0x00, //   Logical Minimum (0)
    0x09, 0x2F, //   Usage (Phone Mute)
    0x09, 0x26, //   Usage (Phone Drop)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x06, //   Report Count (6) - padding
    0x81, 0x03, //   Input (Constant, Variable, Absolute)
    0xC0, // End Collection
    //
    // - LED output collection (host → device mute / off-hook) -
    0x05, 0x08, // Usage Page (LEDs)
    0x09, 0x01, // Usage (LED Indicator)
    0xA1, 0x01, // Collection (Application)
    0x85, REPORT_ID_LED_OUTPUT, //   Report ID (2)
    0x09, 0x09, //   Usage (Mute)
    0x09, 0x17, //   Usage (Off-Hook)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x02, //   Report Count (2)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x06, //   Report Count (6) - padding
    0x91, 0x03, //   Output (Constant, Variable, Absolute)
    0xC0, // End Collection
    //
    // - Keyboard collection -
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x85, REPORT_ID_KEYBOARD, //   Report ID (3)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute) - modifiers
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - reserved byte
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x91, 0x02, //   Output (Data, Variable, Absolute) - LED states
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - LED padding
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x65, //   Logical Maximum (101)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0x65, //   Usage Maximum (101)
    0x81, 0x00, //   Input (Data, Array) - key codes
    0xC0, // End Collection
    //
    // - Consumer control collection -
    0x05, 0x0C, // Usage Page (Consumer Devices)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, REPORT_ID_CONSUMER, //   Report ID (4)
    0x09, 0xE9, //   Usage (Volume Increment)
    0x09, 0xEA, //   Usage (Volume Decrement)
    0x09, 0xE2, //   Usage (Mute)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x03, //   Report Count (3)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x05, //   Report Count (5) - padding
    0x81, 0x01, //   Input (Constant)
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ids_are_distinct() {
        let ids = [
            REPORT_ID_TELEPHONY,
            REPORT_ID_LED_OUTPUT,
            REPORT_ID_KEYBOARD,
            REPORT_ID_CONSUMER,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn map_declares_every_report_id() {
        for id in [
            REPORT_ID_TELEPHONY,
            REPORT_ID_LED_OUTPUT,
            REPORT_ID_KEYBOARD,
            REPORT_ID_CONSUMER,
        ] {
            assert!(
                REPORT_MAP.windows(2).any(|w| w[0] == 0x85 && w[1] == id),
                "report id {id} missing from map"
            );
        }
    }
}
