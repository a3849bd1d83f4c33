//! Unified error types for the arcade panel firmware.
//!
//! Every subsystem converts into the top-level [`Error`], so boot code and
//! adapters handle failures uniformly. All variants are `Copy` so they can
//! be logged and passed around without allocation. The serial protocol
//! itself never reports these to the host.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The OLED panel rejected a command or a frame flush.
    Display(DisplayError),
    /// The serial line could not be read, written, or framed.
    Serial(SerialError),
    /// A GPIO output could not be driven.
    Gpio(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Gpio(msg) => write!(f, "gpio: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Controller did not acknowledge its init sequence.
    InitFailed,
    /// Pushing the off-screen buffer to the panel failed.
    FlushFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "panel init failed"),
            Self::FlushFailed => write!(f, "frame flush failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// UART driver returned an error on read.
    ReadFailed,
    /// UART driver returned an error on write.
    WriteFailed,
    /// An incoming line exceeded the line buffer and was discarded.
    LineTooLong,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "read failed"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::LineTooLong => write!(f, "line too long"),
        }
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
