//! Push-button input driver.
//!
//! ## Hardware
//!
//! Momentary switch to 3V3 with a pull-down, so HIGH = pressed.  The pin
//! is sampled once per loop iteration.  There is no ISR: the only mission
//! that needs edges debounces them in the mission engine, and the doorbell
//! mission wants the raw level.

use embedded_hal::digital::InputPin;

use crate::error::IoError;

pub struct Button<P: InputPin> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Current level, `true` while held down.
    pub fn is_pressed(&mut self) -> Result<bool, IoError> {
        self.pin.is_high().map_err(|_| IoError::GpioRead)
    }
}
