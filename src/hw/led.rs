//! DotStar LED strip status indicator.
//!
//! Rendering only: the controller decides what to show, this module
//! maps it to colors. Steady call status, per-stage calibration
//! blinking, and the blocking mode-change flash patterns all match the
//! reference device behavior.

use embedded_hal::spi::SpiDevice;
use esp_idf_svc::hal::delay::FreeRtos;
use log::warn;
use smart_leds::{brightness, SmartLedsWrite, RGB8};

use crate::config;
use crate::indicator::{ModeFlash, StatusIndicator};
use crate::input::CalibrationPhase;

const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };
const MAGENTA: RGB8 = RGB8 { r: 255, g: 0, b: 255 };
const ORANGE: RGB8 = RGB8 { r: 255, g: 165, b: 0 };
const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// APA102 ("DotStar") frame writer over a SPI device.
///
/// Published APA102 drivers still target the pre-1.0 HAL traits, so
/// the four-byte-per-pixel framing lives here, directly on the 1.0
/// `SpiDevice`.
pub struct Apa102Writer<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Apa102Writer<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }
}

impl<SPI: SpiDevice> SmartLedsWrite for Apa102Writer<SPI> {
    type Error = SPI::Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        // Start frame, then 0xFF + BGR per pixel, then end frame.
        let mut frame: heapless::Vec<u8, 128> = heapless::Vec::new();
        let _ = frame.extend_from_slice(&[0x00; 4]);
        for item in iterator {
            let color: RGB8 = item.into();
            let _ = frame.extend_from_slice(&[0xFF, color.b, color.g, color.r]);
        }
        let _ = frame.extend_from_slice(&[0xFF; 4]);
        self.spi.write(&frame)
    }
}

/// LED strip indicator with persisted brightness.
pub struct LedStrip<S: SmartLedsWrite<Color = RGB8>> {
    strip: S,
    level: u8,
}

impl<S: SmartLedsWrite<Color = RGB8>> LedStrip<S> {
    pub fn new(strip: S, level: u8) -> Self {
        let mut led = Self { strip, level };
        led.fill(OFF);
        led
    }

    fn fill(&mut self, color: RGB8) {
        let pixels = brightness(
            core::iter::repeat(color).take(config::LED_PIXEL_COUNT),
            self.level,
        );
        if self.strip.write(pixels).is_err() {
            warn!("LED strip write failed");
        }
    }

    /// Alternate color/off on a fixed period, clocked by uptime.
    fn blink(&mut self, color: RGB8, period_ms: u64) {
        if (crate::hw::now_ms() / period_ms) % 2 == 0 {
            self.fill(color);
        } else {
            self.fill(OFF);
        }
    }

    /// Blocking n-times flash, as the reference device does on mode
    /// changes.
    fn flash(&mut self, color: RGB8, hold_ms: u32, times: u32) {
        for _ in 0..times {
            self.fill(color);
            FreeRtos::delay_ms(hold_ms);
            self.fill(OFF);
            FreeRtos::delay_ms(hold_ms);
        }
    }
}

impl<S: SmartLedsWrite<Color = RGB8>> StatusIndicator for LedStrip<S> {
    fn call_status(&mut self, call_active: bool, muted: bool) {
        if !call_active {
            self.fill(OFF);
        } else if muted {
            self.fill(RED);
        } else {
            self.fill(GREEN);
        }
    }

    fn calibration_stage(&mut self, phase: CalibrationPhase) {
        match phase {
            CalibrationPhase::Idle => {}
            CalibrationPhase::SamplingUntouched => self.blink(BLUE, 500),
            CalibrationPhase::SamplingTouched => self.blink(MAGENTA, 250),
        }
    }

    fn mode_flash(&mut self, flash: ModeFlash) {
        match flash {
            ModeFlash::VolumeMode => self.flash(GREEN, 150, 2),
            ModeFlash::NavigationMode => self.flash(ORANGE, 150, 2),
            ModeFlash::PushToTalk => self.flash(BLUE, 200, 2),
            ModeFlash::ToggleMute => self.flash(MAGENTA, 200, 2),
            ModeFlash::Pairing => self.flash(BLUE, 100, 5),
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.level = level;
    }

    fn brightness(&self) -> u8 {
        self.level
    }
}
