//! Shared helpers for host integration tests.

#![allow(dead_code)] // each test binary uses a subset of the helpers

use callknob::control::DeviceController;
use callknob::hid::HostStatus;
use callknob::indicator::MockIndicator;
use callknob::transport::MockTransport;
use embedded_hal::delay::DelayNs;

// Links the host critical-section implementation embassy-sync needs.
use critical_section as _;

/// Delay provider that records requested pauses instead of sleeping.
pub struct RecordingDelay;

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub type TestController = DeviceController<MockTransport, RecordingDelay, MockIndicator>;

/// Controller with the given number of fake connected clients.
pub fn controller(clients: usize) -> TestController {
    DeviceController::new(MockTransport::new(clients), RecordingDelay, MockIndicator::new())
}

/// Controller already in an active call, unmuted.
pub fn controller_in_call(clients: usize) -> TestController {
    let mut c = controller(clients);
    c.apply_host_status(HostStatus {
        muted: false,
        off_hook: true,
    });
    c
}
