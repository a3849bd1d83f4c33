//! Mock panel hardware for integration tests.
//!
//! Records every port call so tests can assert on the full display, relay
//! and delay history without touching real GPIO or I²C.

use arcadepanel::app::events::AppEvent;
use arcadepanel::app::ports::{DelayPort, DisplaySurface, EventSink, RelayPort, TextAlign};
use arcadepanel::display::Bitmap;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    Clear,
    Present,
    Bitmap { x: i32, y: i32, bitmap: Bitmap },
    Text { x: i32, y: i32, text: String },
    ProgressBar { x: i32, y: i32, width: u32, height: u32, progress: u8 },
    Circle,
    Line,
    Box,
    SetSlot { slot: usize, connected: bool },
    EnergizeSlot(usize),
    DisconnectAll,
    Pause(u32),
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub calls: Vec<PanelCall>,
    /// Slot-level relay state as the port sees it.
    pub relays: [bool; 4],
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            relays: [false; 4],
        }
    }

    /// Draw calls grouped by `present`; each group ends just before the
    /// present that pushed it. Clears and non-display calls are left out.
    pub fn frames(&self) -> Vec<Vec<PanelCall>> {
        let mut frames = Vec::new();
        let mut current = Vec::new();
        for call in &self.calls {
            match call {
                PanelCall::Present => frames.push(std::mem::take(&mut current)),
                PanelCall::Clear
                | PanelCall::SetSlot { .. }
                | PanelCall::EnergizeSlot(_)
                | PanelCall::DisconnectAll
                | PanelCall::Pause(_) => {}
                other => current.push(other.clone()),
            }
        }
        frames
    }

    pub fn presents(&self) -> usize {
        self.calls.iter().filter(|c| **c == PanelCall::Present).count()
    }

    pub fn progress_values(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PanelCall::ProgressBar { progress, .. } => Some(*progress),
                _ => None,
            })
            .collect()
    }

    pub fn drew(&self, bitmap: Bitmap) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, PanelCall::Bitmap { bitmap: b, .. } if *b == bitmap))
    }

    pub fn count(&self, wanted: &PanelCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn total_pause_ms(&self) -> u32 {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PanelCall::Pause(ms) => Some(*ms),
                _ => None,
            })
            .sum()
    }

    pub fn clear_log(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MockPanel {
    fn clear(&mut self) {
        self.calls.push(PanelCall::Clear);
    }

    fn present(&mut self) {
        self.calls.push(PanelCall::Present);
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: Bitmap) {
        self.calls.push(PanelCall::Bitmap { x, y, bitmap });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _align: TextAlign) {
        self.calls.push(PanelCall::Text {
            x,
            y,
            text: text.to_owned(),
        });
    }

    fn draw_progress_bar(&mut self, x: i32, y: i32, width: u32, height: u32, progress: u8) {
        self.calls.push(PanelCall::ProgressBar {
            x,
            y,
            width,
            height,
            progress,
        });
    }

    fn draw_circle(&mut self, _cx: i32, _cy: i32, _radius: u32) {
        self.calls.push(PanelCall::Circle);
    }

    fn draw_line(&mut self, _from: (i32, i32), _to: (i32, i32)) {
        self.calls.push(PanelCall::Line);
    }

    fn draw_box(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {
        self.calls.push(PanelCall::Box);
    }
}

impl RelayPort for MockPanel {
    fn set_slot(&mut self, slot: usize, connected: bool) {
        self.relays[slot] = connected;
        self.calls.push(PanelCall::SetSlot { slot, connected });
    }

    fn energize_slot(&mut self, slot: usize) {
        self.relays[slot] = true;
        self.calls.push(PanelCall::EnergizeSlot(slot));
    }

    fn disconnect_all(&mut self) {
        self.relays = [false; 4];
        self.calls.push(PanelCall::DisconnectAll);
    }
}

impl DelayPort for MockPanel {
    fn pause_ms(&mut self, ms: u32) {
        self.calls.push(PanelCall::Pause(ms));
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
