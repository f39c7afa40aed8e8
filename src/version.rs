//! Firmware identification reported by the `VERSION` record.
//!
//! The web client compares `FIRMWARE_VERSION` against the release it ships
//! with and offers a reflash on mismatch.

/// Semantic version, taken from `Cargo.toml`.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build number, bumped on every published image.
pub const FIRMWARE_BUILD: u32 = 1;

/// Date of the last firmware change (YYYY-MM-DD).
pub const FIRMWARE_DATE: &str = "2025-11-24";
