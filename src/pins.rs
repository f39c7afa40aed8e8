//! GPIO / peripheral pin assignments for the ESP32 DevKit lesson board.
//!
//! Single source of truth — the binary references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Mission LED (on-board blue LED on most DevKit V1 boards).
/// Driven through an LEDC channel so the PWM mission can dim it.
pub const LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Momentary push-button with external pull-down. HIGH = pressed.
pub const BUTTON_GPIO: i32 = 4;

/// Potentiometer wiper — ADC1 channel 6 (GPIO 34, input-only pin).
pub const POT_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the mission LED (5 kHz — flicker-free).
pub const LED_PWM_FREQ_HZ: u32 = 5_000;

/// ADC1 channel wired to [`POT_GPIO`].
pub const POT_ADC1_CHANNEL: u32 = 6;
