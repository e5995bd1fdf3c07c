//! BLE HID server glue (NimBLE).
//!
//! Builds the HID device with the four report characteristics, wires
//! the server connect/disconnect callbacks into a client counter, and
//! decodes host LED-output writes into the feedback queue. Notes on
//! the connect path:
//!
//! - Some hosts that rebond to a previously paired device never
//!   re-enable notifications; each connect proactively pushes the
//!   current input-report values instead of waiting for the host.
//! - The current telephony status is resent so a newly joined client
//!   is never out of sync with the device's call state.
//! - Advertising restarts while below the connection limit so further
//!   clients can join (multi-client operation).

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use esp32_nimble::enums::{AuthReq, SecurityIOCap};
use esp32_nimble::utilities::mutex::Mutex;
use esp32_nimble::{BLEAdvertisementData, BLECharacteristic, BLEDevice, BLEHIDDevice};
use log::{debug, info, warn};

use crate::config;
use crate::error::Error;
use crate::hid::report_map::{
    REPORT_ID_CONSUMER, REPORT_ID_KEYBOARD, REPORT_ID_LED_OUTPUT, REPORT_ID_TELEPHONY, REPORT_MAP,
};
use crate::hid::{ConsumerReport, HostStatus, KeyboardReport, TelephonyReport};
use crate::transport::{HostFeedbackChannel, Transport};

/// BLE transport backed by the NimBLE HID server.
pub struct BleTransport {
    telephony: Arc<Mutex<BLECharacteristic>>,
    keyboard: Arc<Mutex<BLECharacteristic>>,
    consumer: Arc<Mutex<BLECharacteristic>>,
    clients: Arc<AtomicUsize>,
    /// Last telephony status byte, resent to newly joined clients.
    last_status: Arc<AtomicU8>,
}

/// Initialise the BLE stack and start advertising.
///
/// Must be called exactly once. Host LED-output writes are posted into
/// `feedback`; the poll loop drains the queue each tick.
pub fn init(feedback: &'static HostFeedbackChannel) -> Result<BleTransport, Error> {
    let device = BLEDevice::take();
    device
        .security()
        .set_auth(AuthReq::Bond)
        .set_io_cap(SecurityIOCap::NoInputNoOutput);

    let mut hid = BLEHIDDevice::new(device.get_server());
    hid.manufacturer(config::DEVICE_MANUFACTURER);
    hid.pnp(0x02, config::DEVICE_VID, config::DEVICE_PID, config::DEVICE_VERSION);
    hid.hid_info(0x00, 0x01);
    hid.report_map(REPORT_MAP);

    let telephony = hid.input_report(REPORT_ID_TELEPHONY);
    let keyboard = hid.input_report(REPORT_ID_KEYBOARD);
    let consumer = hid.input_report(REPORT_ID_CONSUMER);
    let led_output = hid.output_report(REPORT_ID_LED_OUTPUT);

    led_output.lock().on_write(move |args| {
        match HostStatus::decode(args.recv_data()) {
            Some(status) => {
                debug!(
                    "host LED report: call {} mute {}",
                    status.off_hook, status.muted
                );
                if feedback.try_send(status).is_err() {
                    warn!("host feedback queue full - dropping update");
                }
            }
            None => warn!("empty LED output report ignored"),
        }
    });

    let clients = Arc::new(AtomicUsize::new(0));
    let last_status = Arc::new(AtomicU8::new(0));
    let server = device.get_server();

    {
        let clients = clients.clone();
        let last_status = last_status.clone();
        let telephony = telephony.clone();
        let keyboard = keyboard.clone();
        let consumer = consumer.clone();
        server.on_connect(move |server, desc| {
            let total = clients.fetch_add(1, Ordering::SeqCst) + 1;
            info!("BLE client connected ({} total): {:?}", total, desc);

            // Workaround for hosts that skip notification re-enable when
            // reconnecting to a bonded device: push the current values
            // on every input characteristic instead of waiting.
            telephony
                .lock()
                .set_value(&[last_status.load(Ordering::SeqCst)])
                .notify();
            keyboard.lock().notify();
            consumer.lock().notify();

            if server.connected_count() < config::MAX_BLE_CONNECTIONS as _ {
                if BLEDevice::take().get_advertising().lock().start().is_err() {
                    warn!("could not restart advertising for further clients");
                }
            }
        });
    }

    {
        let clients = clients.clone();
        server.on_disconnect(move |_desc, reason| {
            let remaining = clients
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| {
                    Some(c.saturating_sub(1))
                })
                .unwrap_or(0)
                .saturating_sub(1);
            info!("BLE client disconnected ({:?}), {} remaining", reason, remaining);
        });
    }

    let advertising = device.get_advertising();
    advertising
        .lock()
        .set_data(
            BLEAdvertisementData::new()
                .name(config::DEVICE_NAME)
                .appearance(config::BLE_APPEARANCE)
                .add_service_uuid(hid.hid_service().lock().uuid()),
        )
        .map_err(|_| Error::BleInit)?;
    advertising.lock().start().map_err(|_| Error::Advertising)?;

    info!("BLE initialized: {}", config::DEVICE_NAME);
    Ok(BleTransport {
        telephony,
        keyboard,
        consumer,
        clients,
        last_status,
    })
}

impl Transport for BleTransport {
    fn connected_clients(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }

    fn send_telephony(&mut self, report: TelephonyReport) -> bool {
        let byte = report.to_byte();
        // Remembered even when undelivered so the next connect resyncs.
        self.last_status.store(byte, Ordering::SeqCst);
        if self.connected_clients() == 0 {
            warn!("no connected clients for status report");
            return false;
        }
        self.telephony.lock().set_value(&[byte]).notify();
        true
    }

    fn send_keyboard(&mut self, report: KeyboardReport) -> bool {
        if self.connected_clients() == 0 {
            warn!("no connected clients for keyboard report");
            return false;
        }
        let mut buf = [0u8; 8];
        report.serialize(&mut buf);
        self.keyboard.lock().set_value(&buf).notify();
        true
    }

    fn send_consumer(&mut self, report: ConsumerReport) -> bool {
        if self.connected_clients() == 0 {
            warn!("no connected clients for consumer report");
            return false;
        }
        self.consumer.lock().set_value(&[report.to_byte()]).notify();
        true
    }

    fn start_advertising(&mut self) -> bool {
        match BLEDevice::take().get_advertising().lock().start() {
            Ok(()) => true,
            Err(e) => {
                warn!("advertising restart failed: {:?}", e);
                false
            }
        }
    }
}
