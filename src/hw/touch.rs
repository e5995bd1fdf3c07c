//! Capacitive touch pad probe.

use esp_idf_svc::sys;

use crate::error::Error;
use crate::input::TouchProbe;

/// Raw touch readings from one ESP32 touch pad.
pub struct Esp32TouchPad {
    pad: sys::touch_pad_t,
}

impl Esp32TouchPad {
    pub fn new(pad_number: u8) -> Result<Self, Error> {
        let pad = pad_number as sys::touch_pad_t;
        unsafe {
            sys::esp!(sys::touch_pad_init()).map_err(|_| Error::TouchSetup)?;
            // Threshold 0: interrupts unused, we poll raw values.
            sys::esp!(sys::touch_pad_config(pad, 0)).map_err(|_| Error::TouchSetup)?;
        }
        Ok(Self { pad })
    }
}

impl TouchProbe for Esp32TouchPad {
    fn read(&mut self) -> u32 {
        let mut value: u16 = 0;
        unsafe {
            sys::touch_pad_read(self.pad, &mut value);
        }
        value as u32
    }
}
