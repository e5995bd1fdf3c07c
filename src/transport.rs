//! Multi-client transport contract.
//!
//! The BLE server (feature `embedded`) implements this trait; host
//! tests use [`MockTransport`]. Two semantics matter to callers:
//!
//! - every `send_*` is gated on "at least one client connected" and
//!   returns `false` when nothing was delivered - an expected outcome,
//!   never an error, never retried;
//! - host → device feedback arrives through the
//!   [`HostFeedbackChannel`], posted from the BLE stack's execution
//!   context and drained by the poll loop before it processes local
//!   events.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::hid::{ConsumerReport, HostStatus, KeyboardReport, TelephonyReport};

/// Single-consumer queue carrying host status writes into the poll
/// loop. The BLE output-report callback runs on the stack's own task;
/// posting through this channel is the only cross-context data path.
pub type HostFeedbackChannel = Channel<CriticalSectionRawMutex, HostStatus, 4>;

/// Report send primitives over the wireless HID link.
pub trait Transport {
    /// Number of currently connected clients.
    fn connected_clients(&self) -> usize;

    /// Send the combined call status report. `false` = not delivered.
    fn send_telephony(&mut self, report: TelephonyReport) -> bool;

    /// Send a keyboard report. `false` = not delivered.
    fn send_keyboard(&mut self, report: KeyboardReport) -> bool;

    /// Send a consumer control report. `false` = not delivered.
    fn send_consumer(&mut self, report: ConsumerReport) -> bool;

    /// Re-enter pairing mode so an additional client can connect.
    fn start_advertising(&mut self) -> bool;
}

/// Recording transport for host tests.
///
/// Tracks a fake client count and every report handed to it, in order.
pub struct MockTransport {
    pub clients: usize,
    pub telephony: heapless::Vec<u8, 32>,
    pub keyboard: heapless::Vec<[u8; 8], 32>,
    pub consumer: heapless::Vec<u8, 32>,
    pub advertising_requests: usize,
}

impl MockTransport {
    pub fn new(clients: usize) -> Self {
        Self {
            clients,
            telephony: heapless::Vec::new(),
            keyboard: heapless::Vec::new(),
            consumer: heapless::Vec::new(),
            advertising_requests: 0,
        }
    }

    pub fn total_sends(&self) -> usize {
        self.telephony.len() + self.keyboard.len() + self.consumer.len()
    }
}

impl Transport for MockTransport {
    fn connected_clients(&self) -> usize {
        self.clients
    }

    fn send_telephony(&mut self, report: TelephonyReport) -> bool {
        if self.clients == 0 {
            return false;
        }
        let _ = self.telephony.push(report.to_byte());
        true
    }

    fn send_keyboard(&mut self, report: KeyboardReport) -> bool {
        if self.clients == 0 {
            return false;
        }
        let mut buf = [0u8; 8];
        report.serialize(&mut buf);
        let _ = self.keyboard.push(buf);
        true
    }

    fn send_consumer(&mut self, report: ConsumerReport) -> bool {
        if self.clients == 0 {
            return false;
        }
        let _ = self.consumer.push(report.to_byte());
        true
    }

    fn start_advertising(&mut self) -> bool {
        self.advertising_requests += 1;
        true
    }
}
