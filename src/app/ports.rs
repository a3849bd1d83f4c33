//! Port traits: the boundary between the interpreter and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CommandInterpreter (domain)
//! ```
//!
//! Driven adapters (OLED surface, relay bank, delays, event sinks) implement
//! these traits. The [`CommandInterpreter`](super::interpreter::CommandInterpreter)
//! consumes them via generics, so the command logic never touches a
//! peripheral directly and runs unchanged against host-side mocks.
//!
//! Port methods are infallible by contract: adapters log hardware faults
//! and carry on, since the serial protocol has no way to report them.

use crate::display::assets::Bitmap;

// ───────────────────────────────────────────────────────────────
// Display surface (domain → OLED)
// ───────────────────────────────────────────────────────────────

/// Horizontal anchoring for [`DisplaySurface::draw_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Off-screen pixel buffer with drawing primitives.
///
/// Nothing reaches the panel until [`present`](Self::present). Callers
/// start every frame with [`clear`](Self::clear).
pub trait DisplaySurface {
    /// Blank the off-screen buffer.
    fn clear(&mut self);

    /// Push the off-screen buffer to the physical panel.
    fn present(&mut self);

    /// Blit an asset with its top-left corner at `(x, y)`.
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: Bitmap);

    /// Draw one line of text; `y` is the top of the glyph cell.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, align: TextAlign);

    /// Rounded progress bar filled to `progress` percent (clamped to 100).
    fn draw_progress_bar(&mut self, x: i32, y: i32, width: u32, height: u32, progress: u8);

    /// One-pixel circle outline.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32);

    /// One-pixel line between two points, inclusive.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32));

    /// Filled rectangle.
    fn draw_box(&mut self, x: i32, y: i32, width: u32, height: u32);
}

// ───────────────────────────────────────────────────────────────
// Relay port (domain → joystick relays)
// ───────────────────────────────────────────────────────────────

/// Joystick relay control, addressed by slot (0..4).
pub trait RelayPort {
    /// Drive every output of `slot` to the same level at once.
    fn set_slot(&mut self, slot: usize, connected: bool);

    /// Energise the outputs of `slot` one at a time with the inter-relay
    /// delay between them.
    fn energize_slot(&mut self, slot: usize);

    /// Open every relay, pausing between groups to spread the coil current.
    fn disconnect_all(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Delay port (domain → blocking waits)
// ───────────────────────────────────────────────────────────────

/// Blocking pause on the command loop. Nothing else runs on this loop
/// while a pause is in progress.
pub trait DelayPort {
    fn pause_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The interpreter emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
