//! Quadrature tick counter for the rotary encoder.
//!
//! Counts on the rising edge of channel A with direction taken from
//! channel B, giving one tick per detent on single-edge encoders. The
//! counter value only ever feeds [`crate::input::EncoderFilter`], which
//! does the debounce and accumulation.

use esp_idf_svc::hal::gpio::{AnyIOPin, Input, PinDriver, Pull};

use crate::error::Error;

pub struct QuadratureCounter<'d> {
    pin_a: PinDriver<'d, AnyIOPin, Input>,
    pin_b: PinDriver<'d, AnyIOPin, Input>,
    last_a: bool,
    count: i64,
}

impl<'d> QuadratureCounter<'d> {
    pub fn new(pin_a: AnyIOPin, pin_b: AnyIOPin) -> Result<Self, Error> {
        let mut a = PinDriver::input(pin_a).map_err(|_| Error::Gpio)?;
        a.set_pull(Pull::Up).map_err(|_| Error::Gpio)?;
        let mut b = PinDriver::input(pin_b).map_err(|_| Error::Gpio)?;
        b.set_pull(Pull::Up).map_err(|_| Error::Gpio)?;
        let last_a = a.is_high();
        Ok(Self {
            pin_a: a,
            pin_b: b,
            last_a,
            count: 0,
        })
    }

    /// Sample the pins and return the running tick count.
    pub fn count(&mut self) -> i64 {
        let a = self.pin_a.is_high();
        if a && !self.last_a {
            if self.pin_b.is_high() {
                self.count -= 1;
            } else {
                self.count += 1;
            }
        }
        self.last_a = a;
        self.count
    }
}
