//! Transport abstraction and the line-oriented serial link built on it.
//!
//! The only transport on the lesson board is UART0 (the USB-serial bridge
//! of the DevKit).  The dispatcher never sees bytes: it receives complete
//! lines from [`SerialLink::poll_line`] and writes records through the
//! [`LineSink`] implementation.

use log::warn;

use crate::app::ports::LineSink;

use super::line::LineDecoder;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Newline-framed text link over a [`Transport`].
pub struct SerialLink<T: Transport> {
    transport: T,
    decoder: LineDecoder,
}

impl<T: Transport> SerialLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: LineDecoder::new(),
        }
    }

    /// Drain available bytes until one line completes.  Never blocks;
    /// bytes after the returned line stay in the transport for the next
    /// call.
    pub fn poll_line(&mut self) -> Option<String> {
        let mut byte = [0u8; 1];
        loop {
            match self.transport.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(line) = self.decoder.push(byte[0]) {
                        return Some(line);
                    }
                }
                Err(e) => {
                    warn!("serial: read failed: {:?}", e);
                    return None;
                }
            }
        }
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), T::Error> {
        while !data.is_empty() {
            let n = self.transport.write(data)?;
            if n == 0 {
                warn!("serial: transport accepted no bytes, dropping {} bytes", data.len());
                break;
            }
            data = &data[n..];
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), T::Error> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")?;
        self.transport.flush()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport> LineSink for SerialLink<T> {
    fn send_line(&mut self, line: &str) {
        if let Err(e) = self.write_line(line) {
            warn!("serial: write failed: {:?}", e);
        }
    }
}
