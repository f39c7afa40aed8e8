//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Dispatcher / MissionEngine (domain)
//! ```
//!
//! Driven adapters (GPIO, ADC, NVS, UART) implement these traits.  The
//! [`Dispatcher`](super::dispatcher::Dispatcher) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::config::SystemConfig;
use crate::error::IoError;

use super::mission::LedOutput;

// ───────────────────────────────────────────────────────────────
// I/O port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// The three fixed logical channels of the lesson board.
pub trait IoPort {
    /// Sample the button. `true` = pressed (logic HIGH).
    fn read_button(&mut self) -> Result<bool, IoError>;

    /// Sample the potentiometer, raw 12-bit ADC counts (0–4095).
    fn read_pot(&mut self) -> Result<u16, IoError>;

    /// Drive the mission LED.
    fn write_led(&mut self, output: LedOutput) -> Result<(), IoError>;

    /// Read back the last LED output for telemetry:
    /// 0/1 for digital levels, the duty (0–255) for PWM.
    fn led_reading(&self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Identity port (driven adapter: domain ↔ persistent user id)
// ───────────────────────────────────────────────────────────────

/// Persistent storage of the learner's user identifier.
pub trait IdentityPort {
    /// Persist a new identifier, replacing any previous one.
    fn set_user_id(&mut self, id: &str) -> Result<(), StorageError>;

    /// Current identifier; empty when none was ever set.
    fn user_id(&self) -> &str;

    /// Whether an identifier has been stored.
    fn has_user_id(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Outbound line sink (driven adapter: domain → serial)
// ───────────────────────────────────────────────────────────────

/// Receives complete protocol records.  The sink adds the line terminator.
pub trait LineSink {
    fn send_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps at `u32::MAX` (~49.7 days);
/// consumers must compare with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads the boot-time system configuration.
///
/// Implementations MUST validate what they read.  Out-of-range values are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage.
///
/// Keys are namespaced to prevent collisions between subsystems.  Writes
/// MUST be atomic — no partial values on power loss.  The ESP-IDF NVS API
/// guarantees this natively; the in-memory simulation trivially.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
