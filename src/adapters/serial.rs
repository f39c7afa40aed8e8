//! UART transport adapter.
//!
//! Implements [`Transport`] over an `esp_idf_hal` UART driver.  Reads use
//! a zero-tick timeout so [`SerialLink::poll_line`](crate::protocol::transport::SerialLink::poll_line)
//! never stalls the mission loop.
//!
//! UART0 is shared with the ESP-IDF console: log lines and protocol
//! records interleave on the wire, and the web client skips any line that
//! is not a JSON object.

#![cfg(target_os = "espidf")]

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::sys::EspError;
use esp_idf_hal::uart::UartDriver;

use crate::protocol::transport::Transport;

pub struct UartTransport<'d> {
    uart: UartDriver<'d>,
}

impl<'d> UartTransport<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }
}

impl Transport for UartTransport<'_> {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
        self.uart.write(data)
    }

    /// The driver's TX ring buffer drains on its own.
    fn flush(&mut self) -> Result<(), EspError> {
        Ok(())
    }
}
