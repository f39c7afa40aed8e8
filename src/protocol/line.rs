//! Newline line assembler.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────────┬────────────┐
//! │ UTF-8 JSON text (≤ 512 B)    │ '\n'       │
//! └──────────────────────────────┴────────────┘
//! ```
//!
//! Bytes are fed one at a time as they come off the UART.  A trailing
//! `'\r'` is stripped so terminals sending CRLF work, and it does not count
//! toward the limit.  A line longer than [`MAX_LINE_LEN`] is dropped in full: the decoder discards everything up
//! to the next newline and resumes with the line after it.

use heapless::Vec;
use log::warn;

use crate::config::MAX_LINE_LEN;

/// Streaming line decoder with a fixed-size buffer.
pub struct LineDecoder {
    buf: Vec<u8, MAX_LINE_LEN>,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
    /// A `'\r'` seen but not yet stored; dropped if `'\n'` follows.
    pending_cr: bool,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            discarding: false,
            pending_cr: false,
        }
    }

    /// Feed one byte.  Returns the completed line when `byte` is `'\n'`.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        if byte == b'\n' {
            self.pending_cr = false;
            if self.discarding {
                self.discarding = false;
                return None;
            }
            let text = String::from_utf8_lossy(&self.buf).into_owned();
            self.buf.clear();
            return Some(text);
        }

        if self.discarding {
            return None;
        }

        // A held '\r' that is not followed by '\n' is part of the line.
        if core::mem::replace(&mut self.pending_cr, byte == b'\r') {
            self.store(b'\r');
        }
        if byte != b'\r' {
            self.store(byte);
        }
        None
    }

    fn store(&mut self, byte: u8) {
        if self.discarding {
            return;
        }
        if self.buf.push(byte).is_err() {
            warn!("serial: line exceeds {} bytes, discarding", MAX_LINE_LEN);
            self.buf.clear();
            self.discarding = true;
            self.pending_cr = false;
        }
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partial line.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
        self.pending_cr = false;
    }
}
