//! Peripheral drivers for the lesson board.

pub mod button;
pub mod led;
pub mod potentiometer;
