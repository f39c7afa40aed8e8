//! Hardware adapter — bridges the board peripherals to [`IoPort`].
//!
//! Owns the button, LED and potentiometer drivers.  This is the only
//! module in the system that touches actual hardware.  It is generic over
//! the embedded-hal pin traits, so host tests plug in mock pins and the
//! firmware plugs in `esp-idf-hal` drivers.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::mission::LedOutput;
use crate::app::ports::IoPort;
use crate::drivers::button::Button;
use crate::drivers::led::Led;
use crate::drivers::potentiometer::{AdcChannel, Potentiometer};
use crate::error::IoError;

/// Concrete adapter that combines all hardware behind the port trait.
pub struct HardwareAdapter<B: InputPin, L: SetDutyCycle, A: AdcChannel> {
    button: Button<B>,
    led: Led<L>,
    pot: Potentiometer<A>,
}

impl<B: InputPin, L: SetDutyCycle, A: AdcChannel> HardwareAdapter<B, L, A> {
    pub fn new(button: Button<B>, led: Led<L>, pot: Potentiometer<A>) -> Self {
        Self { button, led, pot }
    }
}

impl<B: InputPin, L: SetDutyCycle, A: AdcChannel> IoPort for HardwareAdapter<B, L, A> {
    fn read_button(&mut self) -> Result<bool, IoError> {
        self.button.is_pressed()
    }

    fn read_pot(&mut self) -> Result<u16, IoError> {
        self.pot.read()
    }

    fn write_led(&mut self, output: LedOutput) -> Result<(), IoError> {
        // Skip redundant LEDC register writes; the loop runs far faster
        // than the LED changes.
        if output == self.led.current() {
            return Ok(());
        }
        self.led.set(output)
    }

    fn led_reading(&self) -> u8 {
        self.led.current().reading()
    }
}
