//! System configuration parameters
//!
//! Timing constants are part of the wire contract with the web client and
//! are compiled in.  The small [`SystemConfig`] struct carries the few
//! settings that may differ per device and is persisted in NVS.

use serde::{Deserialize, Serialize};

// --- Timing (milliseconds) ---

/// Periodic telemetry cadence.
pub const TELEMETRY_INTERVAL_MS: u32 = 500;
/// Minimum spacing between two accepted button edges.
pub const DEBOUNCE_MS: u32 = 50;
/// Main-loop sleep between iterations.  Rounded up to one FreeRTOS tick.
pub const LOOP_PERIOD_MS: u32 = 5;
/// Blink half-period for `MISSION_1_BLINK`.
pub const BLINK_SLOW_MS: u32 = 1000;
/// Blink half-period for mode 2 of `MISSION_4_STATE_MACHINE`.
pub const BLINK_FAST_MS: u32 = 200;
/// Blink half-period for mode 2 of `MISSION_5_FINAL`.
pub const BLINK_FASTER_MS: u32 = 100;

// --- Signal ranges ---

/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;
/// Full-scale duty of the 8-bit LED PWM channel.
pub const PWM_DUTY_MAX: u8 = 255;

// --- Protocol limits ---

/// Longest accepted inbound line, excluding the newline.
pub const MAX_LINE_LEN: usize = 512;
/// Longest accepted user identifier.
pub const MAX_USER_ID_LEN: usize = 64;

/// What the dispatcher does with a command it cannot execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Drop the command without any response line.
    #[default]
    Silent,
    /// Answer with an `ERROR` record describing the problem.
    Report,
}

/// Per-device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Handling of malformed, unknown or incomplete commands.
    pub error_policy: ErrorPolicy,
    /// Serial line speed.
    pub uart_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Silent,
            uart_baud: 115_200,
        }
    }
}
