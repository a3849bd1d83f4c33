//! Host serial link: byte transport plus newline framing.
//!
//! ```text
//!   UART ──▶ Transport ──▶ LineReader ──▶ SerialPort::poll_line ──▶ interpreter
//! ```
//!
//! Lines are at most [`LINE_CAPACITY`] bytes. A longer line is dropped up
//! to its newline and reported once as [`SerialError::LineTooLong`]. Bytes
//! outside printable ASCII are replaced with `?` so a corrupted line can
//! never match a command.

use heapless::{String, Vec};
use log::warn;

use crate::app::interpreter::LINE_CAPACITY;
use crate::error::SerialError;

/// One received line, newline stripped.
pub type Line = String<LINE_CAPACITY>;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes without blocking. Returns 0 if no data
    /// is available.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write some of `data`, returning the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Block until buffered output has been sent.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

// ── Line framing ──────────────────────────────────────────────

/// Accumulates bytes into lines.
#[derive(Debug, Default)]
pub struct LineReader {
    buf: Vec<u8, LINE_CAPACITY>,
    discarding: bool,
}

impl LineReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Returns a completed line on `\n`, or
    /// `Err(LineTooLong)` at the newline ending an oversized line.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, SerialError>> {
        if byte == b'\n' {
            if core::mem::take(&mut self.discarding) {
                return Some(Err(SerialError::LineTooLong));
            }
            let line = self.buf.iter().map(|&b| sanitize(b)).collect();
            self.buf.clear();
            return Some(Ok(line));
        }

        if self.discarding {
            return None;
        }
        if self.buf.push(byte).is_err() {
            self.buf.clear();
            self.discarding = true;
        }
        None
    }
}

fn sanitize(byte: u8) -> char {
    match byte {
        b'\r' | b'\t' | 0x20..=0x7E => byte as char,
        _ => '?',
    }
}

// ── Serial port ───────────────────────────────────────────────

/// A [`Transport`] with line framing on the receive side.
pub struct SerialPort<T> {
    transport: T,
    reader: LineReader,
}

impl<T: Transport> SerialPort<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reader: LineReader::new(),
        }
    }

    /// Drain available bytes until a line completes or the transport runs
    /// dry. `Ok(None)` means no complete line yet.
    pub fn poll_line(&mut self) -> Result<Option<Line>, SerialError> {
        let mut byte = [0u8; 1];
        loop {
            let n = self.transport.read(&mut byte).map_err(|e| {
                warn!("serial read: {:?}", e);
                SerialError::ReadFailed
            })?;
            if n == 0 {
                return Ok(None);
            }
            if let Some(result) = self.reader.push(byte[0]) {
                return result.map(Some);
            }
        }
    }

    /// Send `text` followed by CR LF.
    pub fn write_line(&mut self, text: &str) -> Result<(), SerialError> {
        self.write_all(text.as_bytes())?;
        self.write_all(b"\r\n")?;
        self.transport.flush().map_err(|e| {
            warn!("serial flush: {:?}", e);
            SerialError::WriteFailed
        })
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), SerialError> {
        while !data.is_empty() {
            let n = self.transport.write(data).map_err(|e| {
                warn!("serial write: {:?}", e);
                SerialError::WriteFailed
            })?;
            if n == 0 {
                return Err(SerialError::WriteFailed);
            }
            data = &data[n..];
        }
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

// ── ESP-IDF UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use uart::UartTransport;

#[cfg(target_os = "espidf")]
mod uart {
    use esp_idf_hal::delay::{BLOCK, NON_BLOCK};
    use esp_idf_hal::sys::EspError;
    use esp_idf_hal::uart::UartDriver;

    use super::Transport;

    /// UART0 as a [`Transport`].
    pub struct UartTransport(pub UartDriver<'static>);

    impl Transport for UartTransport {
        type Error = EspError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
            self.0.read(buf, NON_BLOCK)
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
            self.0.write(data)
        }

        fn flush(&mut self) -> Result<(), EspError> {
            self.0.wait_tx_done(BLOCK)
        }
    }
}
