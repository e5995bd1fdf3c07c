//! Firmware entry point: wire the hardware collaborators to the core
//! and run the poll loop.
//!
//! Everything runs on one cooperative loop at a fixed cadence. Host
//! feedback queued by the BLE task is applied at the top of each tick,
//! before any local event, so local handlers never act on a stale call
//! state.

use callknob::config;
use callknob::console::{self, Command, LineBuffer};
use callknob::control::DeviceController;
use callknob::hw::encoder::QuadratureCounter;
use callknob::hw::led::{Apa102Writer, LedStrip};
use callknob::hw::nvs::NvsStore;
use callknob::hw::touch::Esp32TouchPad;
use callknob::indicator::StatusIndicator;
use callknob::input::{
    ButtonClassifier, ButtonTiming, CalibrationPhase, EncoderFilter, EncoderTuning, TouchSensor,
};
use callknob::transport::HostFeedbackChannel;
use callknob::{ble, hw, storage, Error};

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyIOPin, IOPin, PinDriver, Pull};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriverConfig};
use esp_idf_svc::hal::uart::{config::Config as UartConfig, UartDriver};
use esp_idf_svc::log::EspLogger;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{error, info};

static HOST_FEEDBACK: HostFeedbackChannel = HostFeedbackChannel::new();

fn main() {
    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();

    if let Err(e) = run() {
        error!("startup failed: {:?}", e);
    }
}

fn run() -> Result<(), Error> {
    let peripherals = Peripherals::take().map_err(|_| Error::Gpio)?;
    let pins = peripherals.pins;

    // Buttons, active-low with internal pull-ups.
    let mut left_pin = PinDriver::input(pins.gpio13.downgrade()).map_err(|_| Error::Gpio)?;
    left_pin.set_pull(Pull::Up).map_err(|_| Error::Gpio)?;
    let mut right_pin = PinDriver::input(pins.gpio14.downgrade()).map_err(|_| Error::Gpio)?;
    right_pin.set_pull(Pull::Up).map_err(|_| Error::Gpio)?;
    let mut encoder_button_pin =
        PinDriver::input(pins.gpio7.downgrade()).map_err(|_| Error::Gpio)?;
    encoder_button_pin.set_pull(Pull::Up).map_err(|_| Error::Gpio)?;

    let mut encoder_ticks =
        QuadratureCounter::new(pins.gpio5.downgrade(), pins.gpio6.downgrade())?;

    // LED strip on SPI2 (DotStar: clock + data).
    let spi = SpiDeviceDriver::new_single(
        peripherals.spi2,
        pins.gpio12,
        pins.gpio11,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::new(),
        &SpiConfig::new().baudrate(4.MHz().into()),
    )
    .map_err(|_| Error::Gpio)?;

    // Console on the standard UART.
    let uart = UartDriver::new(
        peripherals.uart0,
        pins.gpio1,
        pins.gpio3,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(config::SERIAL_BAUD)),
    )
    .map_err(|_| Error::Gpio)?;

    let nvs_partition = EspDefaultNvsPartition::take().map_err(|_| Error::Storage)?;
    let mut store = NvsStore::new(nvs_partition);

    let saved_brightness = storage::load_brightness(&mut store, config::LED_BRIGHTNESS_DEFAULT);
    let led = LedStrip::new(Apa102Writer::new(spi), saved_brightness);

    let transport = ble::init(&HOST_FEEDBACK)?;
    let mut controller = DeviceController::new(transport, FreeRtos, led);

    let mut touch = TouchSensor::new(Esp32TouchPad::new(config::TOUCH_PAD)?, FreeRtos);
    touch.begin(&mut store, hw::now_ms());

    let mut left_button = ButtonClassifier::new(ButtonTiming::default());
    let mut right_button = ButtonClassifier::new(ButtonTiming::default());
    let mut encoder_button = ButtonClassifier::new(ButtonTiming::encoder_button());
    let mut encoder = EncoderFilter::new(EncoderTuning::default());

    let mut console_line = LineBuffer::new();
    println!("{}", console::HELP_TEXT);
    info!("callknob ready");

    loop {
        let now = hw::now_ms();

        // Host state first - the feedback callback may have run since
        // the previous tick and the host is authoritative.
        controller.drain_feedback(&HOST_FEEDBACK);

        for event in left_button.update(left_pin.is_low(), now) {
            controller.on_left_button(event);
        }
        for event in right_button.update(right_pin.is_low(), now) {
            controller.on_right_button(event);
        }
        for event in encoder_button.update(encoder_button_pin.is_low(), now) {
            controller.on_encoder_button(event);
        }
        if let Some(direction) = encoder.update(encoder_ticks.count(), now) {
            controller.on_rotation(direction);
        }
        if let Some(event) = touch.update(now, &mut store) {
            controller.on_touch(event);
        }
        if touch.phase() != CalibrationPhase::Idle {
            controller.indicator_mut().calibration_stage(touch.phase());
        }

        // Console pump: drain whatever bytes arrived this tick.
        let mut byte = [0u8; 1];
        while let Ok(1) = uart.read(&mut byte, 0) {
            if let Some(line) = console_line.push(byte[0]) {
                match console::parse_line(&line) {
                    Ok(Command::Calibrate) => {
                        info!("console: starting touch calibration");
                        touch.start_calibration(now);
                    }
                    Ok(Command::Help) => {
                        println!("{}", console::HELP_TEXT);
                        print_touch_status(&mut touch);
                        println!(
                            "Current LED brightness: {}/255",
                            controller.indicator_mut().brightness()
                        );
                    }
                    Ok(Command::ShowBrightness) => {
                        println!(
                            "Current LED brightness: {}",
                            controller.indicator_mut().brightness()
                        );
                    }
                    Ok(Command::SetBrightness(level)) => {
                        controller.indicator_mut().set_brightness(level);
                        storage::save_brightness(&mut store, level);
                        println!("LED brightness set to: {}", level);
                    }
                    Err(e) => {
                        println!("Unknown command ({:?}). Type 'h' for help.", e);
                    }
                }
            }
        }

        FreeRtos::delay_ms(config::POLL_INTERVAL_MS);
    }
}

fn print_touch_status(touch: &mut TouchSensor<Esp32TouchPad, FreeRtos>) {
    println!("------ Touch Sensor Status ------");
    println!(
        "Calibrated: {}",
        if touch.is_calibrated() { "YES" } else { "NO" }
    );
    if touch.is_calibrated() {
        let profile = *touch.profile();
        println!("Untouched value: {}", profile.untouched);
        println!("Touched value: {}", profile.touched);
        println!("Threshold: {}", profile.threshold);
        println!("Current raw value: {}", touch.raw_value());
    }
    println!("-------------------------------");
}
