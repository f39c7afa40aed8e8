//! Newline-delimited JSON protocol spoken with the web client.
//!
//! ```text
//! ┌───────────┐   bytes   ┌─────────────┐  line   ┌──────────┐  Command  ┌────────────┐
//! │ Transport │──────────▶│ LineDecoder │────────▶│ parse()  │──────────▶│ Dispatcher │
//! └───────────┘           └─────────────┘         └──────────┘           └────────────┘
//!       ▲                                                                      │
//!       │            line + '\n'            ┌──────────────────┐   Outbound    │
//!       └───────────────────────────────────│ SerialLink       │◀──────────────┘
//!                                           └──────────────────┘
//! ```
//!
//! One JSON object per line in both directions.  Inbound records carry a
//! string `type`; outbound records are TELEMETRY, ACK, ERROR and VERSION.

pub mod command;
pub mod line;
pub mod message;
pub mod transport;

pub use command::{Command, CommandKind, parse};
pub use message::{
    Outbound, Readings, serialize_ack, serialize_error, serialize_telemetry, serialize_version,
};
