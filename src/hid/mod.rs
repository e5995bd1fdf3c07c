//! HID report types and the BLE report map.
//!
//! The device exposes four report channels, each bound to a fixed
//! report identifier:
//!
//! | ID | Direction     | Payload                                   |
//! |----|---------------|-------------------------------------------|
//! | 1  | device → host | telephony status (bit0 mute, bit1 drop)   |
//! | 2  | host → device | LED output (bit0 mute, bit1 off-hook)     |
//! | 3  | device → host | boot-protocol keyboard (8 bytes)          |
//! | 4  | device → host | consumer control bitfield (1 byte)        |

pub mod consumer;
pub mod keyboard;
pub mod report_map;
pub mod telephony;

pub use consumer::ConsumerReport;
pub use keyboard::{Chord, ChordTiming, KeyboardReport};
pub use telephony::{HostStatus, TelephonyReport};
