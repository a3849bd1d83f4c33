//! Command interpreter: the panel's only stateful domain object.
//!
//! Owns readiness, the four joystick slots and the shared status cell.
//! Every inbound line runs to completion on the caller's thread and yields
//! exactly one reply line. Hardware is reached only through the port
//! traits, so the whole protocol runs against host mocks.
//!
//! ```text
//!   AwaitingHandshake ──ESP32?──▶ Configuring ──4 slots done──▶ Ready
//! ```
//!
//! There is no way back from `Ready` short of a reboot. A repeated
//! `ESP32?` re-runs the slot setup and stays `Ready` throughout.

use heapless::String;
use log::{info, warn};

use super::commands::{Command, HANDSHAKE, PlayerVerb, SessionVerb, clamp_players};
use super::events::{AppEvent, RejectReason};
use super::ports::{DelayPort, DisplaySurface, EventSink, RelayPort};
use crate::config::{PanelConfig, ReadyTransition};
use crate::display::screens::{self, FrameStart, Screen};
use crate::drivers::relay::SLOT_COUNT;
use crate::drivers::status_led::{LedStatus, StatusCell};

/// Longest line accepted from the host, in bytes.
pub const LINE_CAPACITY: usize = 64;
/// Room for `ACK:` plus an echoed line.
pub const REPLY_CAPACITY: usize = LINE_CAPACITY + 8;

/// One reply line, without the trailing newline.
pub type Reply = String<REPLY_CAPACITY>;

/// Reply to a completed handshake.
pub const READY_REPLY: &str = "ESP32 ready";
/// Reply to anything unknown or out of context.
pub const UNKNOWN_REPLY: &str = "ACK:?";
/// Printed once on the serial line at boot, before any command.
pub const BOOT_BANNER: &str = "ESP32 ready to receive messages...";

/// Handshake progress per slot step, in percent.
const STEP_PERCENT: u8 = 25;

/// Host link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    AwaitingHandshake,
    Configuring,
    Ready,
}

/// One joystick position on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickSlot {
    pub index: usize,
    pub connected: bool,
}

pub struct CommandInterpreter {
    readiness: Readiness,
    slots: [JoystickSlot; SLOT_COUNT],
    config: PanelConfig,
    status: StatusCell,
}

fn reply(text: &str) -> Reply {
    reply_with(text, "")
}

/// `prefix` followed by `body`, cut at the last char that fits.
fn reply_with(prefix: &str, body: &str) -> Reply {
    let mut out = Reply::new();
    for c in prefix.chars().chain(body.chars()) {
        if out.push(c).is_err() {
            warn!("reply truncated at {} bytes", out.len());
            break;
        }
    }
    out
}

impl CommandInterpreter {
    /// `status` is the cell the indicator thread reads; pass a clone.
    pub fn new(config: PanelConfig, status: StatusCell) -> Self {
        Self {
            readiness: Readiness::AwaitingHandshake,
            slots: core::array::from_fn(|index| JoystickSlot {
                index,
                connected: false,
            }),
            config,
            status,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn slots(&self) -> &[JoystickSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Connected flag per slot, in slot order.
    pub fn connected(&self) -> [bool; SLOT_COUNT] {
        self.slots.map(|s| s.connected)
    }

    pub fn status(&self) -> LedStatus {
        self.status.get()
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    // ── Internal helpers ──────────────────────────────────────

    fn set_status(&mut self, status: LedStatus, sink: &mut impl EventSink) {
        if self.status.get() != status {
            self.status.set(status);
            sink.emit(&AppEvent::StatusChanged(status));
        }
    }

    fn show(
        &self,
        hw: &mut impl DisplaySurface,
        screen: Screen,
        start: FrameStart,
        sink: &mut impl EventSink,
    ) {
        let stars_lit = self.status.get() == LedStatus::Ready;
        screens::show(hw, screen, stars_lit, start);
        sink.emit(&AppEvent::ScreenShown(screen));
    }

    fn set_all_slots(&mut self, connected: bool) {
        for slot in &mut self.slots {
            slot.connected = connected;
        }
    }

    fn reject(&self, reason: RejectReason, sink: &mut impl EventSink) -> Reply {
        sink.emit(&AppEvent::Rejected(reason));
        reply(UNKNOWN_REPLY)
    }

    // ── Boot ──────────────────────────────────────────────────

    /// Splash, then park on the waiting screen with every relay open.
    pub fn boot(
        &mut self,
        hw: &mut (impl DisplaySurface + RelayPort + DelayPort),
        sink: &mut impl EventSink,
    ) {
        self.set_status(LedStatus::Off, sink);
        self.show(hw, Screen::Loading, FrameStart::Clear, sink);
        hw.pause_ms(self.config.boot_splash_ms);
        hw.clear();
        hw.present();

        self.set_status(LedStatus::Waiting, sink);
        hw.disconnect_all();
        self.set_all_slots(false);
        self.show(hw, Screen::Waiting, FrameStart::Clear, sink);
        sink.emit(&AppEvent::Booted);
    }

    // ── Commands ──────────────────────────────────────────────

    /// Interpret one line from the host and return the reply to send.
    pub fn handle_line(
        &mut self,
        line: &str,
        hw: &mut (impl DisplaySurface + RelayPort + DelayPort),
        sink: &mut impl EventSink,
    ) -> Reply {
        match Command::parse(line) {
            Command::Handshake => self.handshake(hw, sink),
            Command::Players { verb, count, line } => self.players(verb, count, line, hw, sink),
            Command::Session(verb) => self.session(verb, hw, sink),
            Command::Unknown => self.reject(RejectReason::UnknownVerb, sink),
        }
    }

    /// Reply for a line that overflowed the receive buffer.
    pub fn overflow(&mut self, sink: &mut impl EventSink) -> Reply {
        self.reject(RejectReason::Overflow, sink)
    }

    fn handshake(
        &mut self,
        hw: &mut (impl DisplaySurface + RelayPort + DelayPort),
        sink: &mut impl EventSink,
    ) -> Reply {
        if self.readiness == Readiness::Ready {
            info!("{} repeated, re-running slot setup", HANDSHAKE);
        } else {
            self.readiness = Readiness::Configuring;
        }
        sink.emit(&AppEvent::HandshakeStarted);
        self.set_status(LedStatus::Config, sink);

        for slot in 0..SLOT_COUNT {
            let progress = (slot as u8 + 1) * STEP_PERCENT;
            self.show(hw, Screen::Progress(progress), FrameStart::Clear, sink);
            hw.energize_slot(slot);
            self.slots[slot].connected = true;
            hw.pause_ms(self.config.init_step_hold_ms);
            sink.emit(&AppEvent::SlotConfigured { slot, progress });
        }

        self.readiness = Readiness::Ready;
        self.set_status(LedStatus::Ready, sink);
        let start = match self.config.ready_transition {
            ReadyTransition::Clear => FrameStart::Clear,
            ReadyTransition::Overlay => FrameStart::Overlay,
        };
        self.show(hw, Screen::Ready, start, sink);
        sink.emit(&AppEvent::Ready);
        reply(READY_REPLY)
    }

    fn players(
        &mut self,
        verb: PlayerVerb,
        requested: i32,
        line: &str,
        hw: &mut (impl DisplaySurface + RelayPort),
        sink: &mut impl EventSink,
    ) -> Reply {
        if self.readiness != Readiness::Ready {
            return self.reject(RejectReason::NotReady, sink);
        }

        let connected = clamp_players(requested, self.config.clamp_floor.value());
        for slot in &mut self.slots {
            slot.connected = slot.index < connected;
            hw.set_slot(slot.index, slot.connected);
        }
        self.show(hw, Screen::Joysticks(self.connected()), FrameStart::Clear, sink);
        sink.emit(&AppEvent::PlayersChanged {
            verb,
            requested,
            connected,
        });

        reply_with("ACK:", line)
    }

    fn session(
        &mut self,
        verb: SessionVerb,
        hw: &mut (impl DisplaySurface + RelayPort),
        sink: &mut impl EventSink,
    ) -> Reply {
        match verb {
            SessionVerb::Starting | SessionVerb::Started => {
                let status = if verb == SessionVerb::Starting {
                    LedStatus::Config
                } else {
                    LedStatus::Ready
                };
                self.set_status(status, sink);
                self.show(hw, Screen::Starting, FrameStart::Clear, sink);
                hw.disconnect_all();
                self.set_all_slots(false);
            }
            SessionVerb::Stopping => {
                self.set_status(LedStatus::Config, sink);
                // Display model only; the relays keep their state.
                self.set_all_slots(true);
                self.show(hw, Screen::Stopping(self.connected()), FrameStart::Clear, sink);
            }
            SessionVerb::Stopped => {
                self.set_status(LedStatus::Waiting, sink);
                self.show(hw, Screen::Stopped, FrameStart::Clear, sink);
                hw.disconnect_all();
                self.set_all_slots(false);
            }
        }
        sink.emit(&AppEvent::Session(verb));

        reply_with("ACK:", verb.as_char().encode_utf8(&mut [0u8; 4]))
    }
}
