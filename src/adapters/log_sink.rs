//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger. The serial line carries both these log lines and the
//! protocol replies; hosts ignore anything that is not a reply.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted => info!("BOOT  | waiting for host"),
            AppEvent::HandshakeStarted => info!("LINK  | handshake, configuring slots"),
            AppEvent::SlotConfigured { slot, progress } => {
                info!("LINK  | slot {} configured ({}%)", slot + 1, progress);
            }
            AppEvent::Ready => info!("LINK  | ready"),
            AppEvent::PlayersChanged {
                verb,
                requested,
                connected,
            } => {
                info!(
                    "PLAY  | {} requested={} connected={}",
                    verb.as_char(),
                    requested,
                    connected
                );
            }
            AppEvent::Session(verb) => info!("GAME  | {:?}", verb),
            AppEvent::ScreenShown(screen) => debug!("SCRN  | {:?}", screen),
            AppEvent::StatusChanged(status) => info!("LED   | {:?}", status),
            AppEvent::Rejected(reason) => warn!("REJ   | {:?}", reason),
        }
    }
}
