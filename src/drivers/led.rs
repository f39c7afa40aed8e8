//! Mission LED driver.
//!
//! A single LEDC PWM channel drives the LED for every mission.  Digital
//! levels map to fully off / fully on; the PWM mission passes an 8-bit
//! duty straight through.  The last output is kept for telemetry, since
//! reading back an LEDC channel is not possible through `SetDutyCycle`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `esp_idf_hal::ledc::LedcDriver`.
//! On host/test: any `SetDutyCycle` mock.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::mission::LedOutput;
use crate::config::PWM_DUTY_MAX;
use crate::error::IoError;

pub struct Led<P: SetDutyCycle> {
    pwm: P,
    current: LedOutput,
}

impl<P: SetDutyCycle> Led<P> {
    /// Wraps `pwm` and drives it low.
    pub fn new(pwm: P) -> Result<Self, IoError> {
        let mut led = Self {
            pwm,
            current: LedOutput::LOW,
        };
        led.set(LedOutput::LOW)?;
        Ok(led)
    }

    pub fn set(&mut self, output: LedOutput) -> Result<(), IoError> {
        let result = match output {
            LedOutput::Level(true) => self.pwm.set_duty_cycle_fully_on(),
            LedOutput::Level(false) => self.pwm.set_duty_cycle_fully_off(),
            LedOutput::Duty(duty) => self
                .pwm
                .set_duty_cycle_fraction(u16::from(duty), u16::from(PWM_DUTY_MAX)),
        };
        result.map_err(|_| IoError::PwmWrite)?;
        self.current = output;
        Ok(())
    }

    pub fn current(&self) -> LedOutput {
        self.current
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}
