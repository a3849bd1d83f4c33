//! Hardware adapter: bridges the real peripherals to the domain port traits.
//!
//! Owns the OLED surface, the relay bank and the command-loop delay,
//! exposing them through [`DisplaySurface`], [`RelayPort`] and
//! [`DelayPort`]. The interpreter is generic over those traits, so this is
//! the only object in the firmware that touches the panel hardware.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::{DelayPort, DisplaySurface, RelayPort, TextAlign};
use crate::display::assets::{AssetSource, Bitmap};
use crate::display::framebuffer::FrameTarget;
use crate::display::surface::GraphicsSurface;
use crate::drivers::relay::RelayBank;

/// Concrete adapter that combines the panel hardware behind port traits.
pub struct HardwareAdapter<F, A, P, D> {
    surface: GraphicsSurface<F, A>,
    relays: RelayBank<P>,
    delay: D,
}

impl<F, A, P, D> HardwareAdapter<F, A, P, D> {
    pub fn new(surface: GraphicsSurface<F, A>, relays: RelayBank<P>, delay: D) -> Self {
        Self {
            surface,
            relays,
            delay,
        }
    }

    pub fn surface(&self) -> &GraphicsSurface<F, A> {
        &self.surface
    }

    pub fn relays(&self) -> &RelayBank<P> {
        &self.relays
    }
}

// ── DisplaySurface implementation ─────────────────────────────

impl<F, A, P, D> DisplaySurface for HardwareAdapter<F, A, P, D>
where
    F: FrameTarget,
    F::Error: core::fmt::Debug,
    A: AssetSource,
{
    fn clear(&mut self) {
        self.surface.clear();
    }

    fn present(&mut self) {
        self.surface.present();
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: Bitmap) {
        self.surface.draw_bitmap(x, y, bitmap);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, align: TextAlign) {
        self.surface.draw_text(x, y, text, align);
    }

    fn draw_progress_bar(&mut self, x: i32, y: i32, width: u32, height: u32, progress: u8) {
        self.surface.draw_progress_bar(x, y, width, height, progress);
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32) {
        self.surface.draw_circle(cx, cy, radius);
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.surface.draw_line(from, to);
    }

    fn draw_box(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.surface.draw_box(x, y, width, height);
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<F, A, P, D> RelayPort for HardwareAdapter<F, A, P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn set_slot(&mut self, slot: usize, connected: bool) {
        self.relays.set_slot(slot, connected);
    }

    fn energize_slot(&mut self, slot: usize) {
        self.relays.energize_slot(slot, &mut self.delay);
    }

    fn disconnect_all(&mut self) {
        self.relays.disconnect_all(&mut self.delay);
    }
}

// ── DelayPort implementation ──────────────────────────────────

impl<F, A, P, D: DelayNs> DelayPort for HardwareAdapter<F, A, P, D> {
    fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
