//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules of the lesson board: the mission engine
//! and the command dispatcher.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod dispatcher;
pub mod mission;
pub mod ports;
