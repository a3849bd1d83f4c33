//! Frame targets: draw buffers that can be blanked and pushed to a panel.
//!
//! [`FrameTarget`] is what [`GraphicsSurface`](super::surface::GraphicsSurface)
//! needs from a display driver. The SSD1306 buffered mode implements it on
//! hardware; [`MemoryFrame`] implements it on the host for tests and
//! simulation.

use core::convert::Infallible;

use display_interface::{DisplayError as BusError, WriteOnlyDataCommand};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use ssd1306::{Ssd1306, mode::BufferedGraphicsMode, size::DisplaySize};

use crate::error::DisplayError;

/// Panel width in pixels.
pub const WIDTH: u32 = 128;
/// Panel height in pixels.
pub const HEIGHT: u32 = 64;

/// A monochrome draw buffer with an explicit flush to the panel.
pub trait FrameTarget: DrawTarget<Color = BinaryColor> {
    /// Blank the buffer without touching the panel.
    fn clear_frame(&mut self);

    /// Push the buffer to the panel.
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

// ── SSD1306 (hardware) ────────────────────────────────────────

impl<DI, SIZE> FrameTarget for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn clear_frame(&mut self) {
        self.clear_buffer();
    }

    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|e: BusError| {
            log::warn!("ssd1306 flush: {:?}", e);
            DisplayError::FlushFailed
        })
    }
}

// ── In-memory frame (host) ────────────────────────────────────

const BYTES: usize = (WIDTH * HEIGHT / 8) as usize;

/// 128x64 1-bpp buffer. "Flushing" copies the working buffer into a
/// presented snapshot, so tests can tell drawn pixels from shown pixels.
#[derive(Clone)]
pub struct MemoryFrame {
    working: [u8; BYTES],
    shown: [u8; BYTES],
    flushes: u32,
}

impl Default for MemoryFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFrame {
    pub fn new() -> Self {
        Self {
            working: [0; BYTES],
            shown: [0; BYTES],
            flushes: 0,
        }
    }

    fn index(x: u32, y: u32) -> (usize, u8) {
        let bit = (y * WIDTH + x) as usize;
        (bit / 8, 1 << (bit % 8))
    }

    /// Whether a pixel is lit in the working buffer.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let (byte, mask) = Self::index(x, y);
        self.working[byte] & mask != 0
    }

    /// Whether a pixel is lit on the (simulated) panel.
    pub fn shown_pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let (byte, mask) = Self::index(x, y);
        self.shown[byte] & mask != 0
    }

    /// Number of lit pixels in the working buffer.
    pub fn lit_count(&self) -> u32 {
        self.working.iter().map(|b| b.count_ones()).sum()
    }

    /// Number of lit pixels in a rectangle of the working buffer.
    pub fn lit_in(&self, x: u32, y: u32, width: u32, height: u32) -> u32 {
        let mut n = 0;
        for py in y..y + height {
            for px in x..x + width {
                if self.pixel(px, py) {
                    n += 1;
                }
            }
        }
        n
    }

    /// How many times the frame has been flushed.
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }
}

impl OriginDimensions for MemoryFrame {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for MemoryFrame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let (byte, mask) = Self::index(x, y);
            if color.is_on() {
                self.working[byte] |= mask;
            } else {
                self.working[byte] &= !mask;
            }
        }
        Ok(())
    }
}

impl FrameTarget for MemoryFrame {
    fn clear_frame(&mut self) {
        self.working = [0; BYTES];
    }

    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        self.shown = self.working;
        self.flushes += 1;
        Ok(())
    }
}
