//! Ninho mission firmware library.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! firmware binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod protocol;
pub mod version;

// Hardware-facing modules; the actual device implementations are guarded
// by cfg attributes inside.
pub mod adapters;
pub mod drivers;
