//! Outbound application events.
//!
//! The [`CommandInterpreter`](super::interpreter::CommandInterpreter) emits
//! these through the [`EventSink`](super::ports::EventSink) port. The only
//! production sink writes them to the log.

use super::commands::{PlayerVerb, SessionVerb};
use crate::display::screens::Screen;
use crate::drivers::status_led::LedStatus;

/// Why a line was answered with `ACK:?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// First character is not a known verb.
    UnknownVerb,
    /// A player-count verb arrived before the handshake completed.
    NotReady,
    /// The line overflowed the receive buffer.
    Overflow,
}

/// Structured events emitted by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot sequence finished; the waiting screen is up.
    Booted,

    /// Handshake received, per-slot configuration started.
    HandshakeStarted,

    /// One slot of the handshake sequence finished.
    SlotConfigured { slot: usize, progress: u8 },

    /// Handshake completed; player counts are now honoured.
    Ready,

    /// A player-count command was applied.
    PlayersChanged { verb: PlayerVerb, requested: i32, connected: usize },

    /// A session verb was applied.
    Session(SessionVerb),

    /// A screen was composed and presented.
    ScreenShown(Screen),

    /// The status LED target changed.
    StatusChanged(LedStatus),

    /// A line was answered with `ACK:?`.
    Rejected(RejectReason),
}
