//! `DisplaySurface` adapter over any `embedded-graphics` frame target.
//!
//! Owns the frame target and the asset source. Drawing errors are logged
//! and swallowed: the interpreter has no channel to report them and the
//! next frame redraws everything anyway.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use log::{debug, warn};

use super::assets::{AssetSource, Bitmap};
use super::framebuffer::FrameTarget;
use super::xbm::Xbm;
use crate::app::ports::{DisplaySurface, TextAlign};
use crate::error::Error;

// ── Progress bar geometry ─────────────────────────────────────

/// Derived measurements for a rounded progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGeometry {
    /// Corner radius, `height / 2`.
    pub radius: u32,
    /// Length of the straight top/bottom edges, `width - 2*radius + 1`.
    pub span: u32,
    /// Filled length from the left inner edge, `span * progress / 100`.
    pub fill: u32,
    /// Radius of the disc capping the fill, `radius - 2`.
    pub cap_radius: u32,
}

impl ProgressGeometry {
    pub fn new(width: u32, height: u32, progress: u8) -> Self {
        let radius = height / 2;
        let span = (width + 1).saturating_sub(2 * radius);
        let progress = u32::from(progress.min(100));
        Self {
            radius,
            span,
            fill: span * progress / 100,
            cap_radius: radius.saturating_sub(2),
        }
    }
}

const fn diameter(radius: u32) -> u32 {
    2 * radius + 1
}

// ── Surface ───────────────────────────────────────────────────

/// Concrete [`DisplaySurface`] drawing into a [`FrameTarget`].
pub struct GraphicsSurface<F, A> {
    frame: F,
    assets: A,
}

impl<F, A> GraphicsSurface<F, A>
where
    F: FrameTarget,
    F::Error: core::fmt::Debug,
    A: AssetSource,
{
    pub fn new(frame: F, assets: A) -> Self {
        Self { frame, assets }
    }

    /// Borrow the underlying frame (tests inspect pixels through this).
    pub fn frame(&self) -> &F {
        &self.frame
    }

    fn draw<D>(&mut self, what: &'static str, item: &D)
    where
        D: Drawable<Color = BinaryColor>,
    {
        if let Err(e) = item.draw(&mut self.frame) {
            warn!("display: drawing {} failed: {:?}", what, e);
        }
    }

    fn outline(&mut self, top_left: Point, size: Size) {
        let rect = Rectangle::new(top_left, size)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));
        self.draw("placeholder", &rect);
    }
}

impl<F, A> DisplaySurface for GraphicsSurface<F, A>
where
    F: FrameTarget,
    F::Error: core::fmt::Debug,
    A: AssetSource,
{
    fn clear(&mut self) {
        self.frame.clear_frame();
    }

    fn present(&mut self) {
        if let Err(e) = self.frame.flush_frame() {
            warn!("display: {}", Error::from(e));
        }
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: Bitmap) {
        let top_left = Point::new(x, y);
        let size = bitmap.size();
        match self
            .assets
            .xbm(bitmap)
            .and_then(|data| Xbm::new(data, size, top_left))
        {
            Some(image) => self.draw("bitmap", &image),
            None => {
                debug!("display: no artwork for {:?}, drawing outline", bitmap);
                self.outline(top_left, size);
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, align: TextAlign) {
        let character_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let alignment = match align {
            TextAlign::Left => Alignment::Left,
            TextAlign::Center => Alignment::Center,
            TextAlign::Right => Alignment::Right,
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build();
        let item = Text::with_text_style(text, Point::new(x, y), character_style, text_style);
        self.draw("text", &item);
    }

    fn draw_progress_bar(&mut self, x: i32, y: i32, width: u32, height: u32, progress: u8) {
        let g = ProgressGeometry::new(width, height, progress);
        let r = g.radius as i32;
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let fill = PrimitiveStyle::with_fill(BinaryColor::On);

        // Outer frame
        let left = Point::new(x + r, y + r);
        let right = Point::new(x + width as i32 - r, y + r);
        self.draw("bar", &Circle::with_center(left, diameter(g.radius)).into_styled(stroke));
        self.draw("bar", &Circle::with_center(right, diameter(g.radius)).into_styled(stroke));
        if g.span > 0 {
            let end = x + r + g.span as i32 - 1;
            self.draw_line((x + r, y), (end, y));
            self.draw_line((x + r, y + height as i32), (end, y + height as i32));
        }

        // Filled part
        let body = Rectangle::new(
            Point::new(x + r, y + 1),
            Size::new(g.fill, height.saturating_sub(1)),
        );
        self.draw("bar", &body.into_styled(fill));
        let cap = Point::new(x + r + g.fill as i32, y + r);
        self.draw("bar", &Circle::with_center(cap, diameter(g.cap_radius)).into_styled(fill));
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32) {
        let circle = Circle::with_center(Point::new(cx, cy), diameter(radius))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));
        self.draw("circle", &circle);
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32)) {
        let line = Line::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));
        self.draw("line", &line);
    }

    fn draw_box(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let rect = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On));
        self.draw("box", &rect);
    }
}
