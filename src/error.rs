//! Unified error types for the Ninho firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! dispatcher's error handling uniform.  No variant is fatal: the polling
//! loop reports or drops the failed command and keeps ticking.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible dispatcher operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The inbound command could not be executed as sent.
    Command(CommandError),
    /// A pin or ADC access failed.
    Io(IoError),
    /// The persistent key/value store failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl Error {
    /// Whether the fault lies with the sender rather than the device.
    ///
    /// Sender faults are subject to the [`ErrorPolicy`](crate::config::ErrorPolicy);
    /// device faults are always reported.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Command(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was not a JSON object with a string `type` field.
    Malformed,
    /// Well-formed object whose `type` names no known command.
    UnknownCommand(String),
    /// `SET_MISSION` named a mission this firmware does not have.
    UnknownMission(String),
    /// A field the command needs was absent.
    MissingField(&'static str),
    /// `SET_ID` carried an identifier that cannot be stored.
    InvalidUserId,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "invalid JSON"),
            Self::UnknownCommand(kind) => write!(f, "unknown command: {kind}"),
            Self::UnknownMission(id) => write!(f, "unknown mission: {id}"),
            Self::MissingField(field) => write!(f, "missing field: {field}"),
            Self::InvalidUserId => write!(f, "invalid userId"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// I/O errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// GPIO level read failed.
    GpioRead,
    /// ADC conversion failed or timed out.
    AdcRead,
    /// LEDC duty-cycle write failed.
    PwmWrite,
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioRead => write!(f, "GPIO read failed"),
            Self::AdcRead => write!(f, "ADC read failed"),
            Self::PwmWrite => write!(f, "PWM write failed"),
        }
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
