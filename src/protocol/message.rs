//! Outbound records.
//!
//! Field order is part of the contract with the web client, which matches
//! on raw prefixes in a couple of places.  Every record starts with
//! `"type"`, followed by the fields in declaration order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readings {
    pub led: u8,
    pub btn: u8,
    pub pot: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outbound<'a> {
    Telemetry {
        #[serde(rename = "userId")]
        user_id: &'a str,
        #[serde(rename = "missionId")]
        mission_id: &'a str,
        readings: Readings,
    },
    Ack {
        command: &'a str,
    },
    Error {
        message: &'a str,
    },
    Version {
        version: &'a str,
        build: u32,
        date: &'a str,
    },
}

impl Outbound<'_> {
    /// Compact JSON, no terminator.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn serialize_telemetry(
    user_id: &str,
    mission_id: &str,
    led: u8,
    btn: u8,
    pot: u16,
) -> serde_json::Result<String> {
    Outbound::Telemetry {
        user_id,
        mission_id,
        readings: Readings { led, btn, pot },
    }
    .to_line()
}

pub fn serialize_ack(command: &str) -> serde_json::Result<String> {
    Outbound::Ack { command }.to_line()
}

pub fn serialize_error(message: &str) -> serde_json::Result<String> {
    Outbound::Error { message }.to_line()
}

pub fn serialize_version(version: &str, build: u32, date: &str) -> serde_json::Result<String> {
    Outbound::Version {
        version,
        build,
        date,
    }
    .to_line()
}
