//! XBM image drawable for `embedded-graphics`.
//!
//! `ImageRaw` expects MSB-first rows; XBM stores the leftmost pixel in the
//! least-significant bit, so the artwork is decoded here instead.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// A borrowed XBM image placed at a fixed position. Only set bits are
/// drawn, so the image composes over whatever is already in the buffer.
pub struct Xbm<'a> {
    data: &'a [u8],
    size: Size,
    top_left: Point,
}

impl<'a> Xbm<'a> {
    /// `None` if `data` is too short for `size`.
    pub fn new(data: &'a [u8], size: Size, top_left: Point) -> Option<Self> {
        let stride = size.width.div_ceil(8) as usize;
        if data.len() < stride * size.height as usize {
            return None;
        }
        Some(Self {
            data,
            size,
            top_left,
        })
    }

    fn stride(&self) -> usize {
        self.size.width.div_ceil(8) as usize
    }

    fn is_set(&self, x: u32, y: u32) -> bool {
        let byte = self.data[y as usize * self.stride() + (x / 8) as usize];
        byte & (1 << (x % 8)) != 0
    }
}

impl Drawable for Xbm<'_> {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let (w, h) = (self.size.width, self.size.height);
        let pixels = (0..h).flat_map(move |y| {
            (0..w).filter_map(move |x| {
                self.is_set(x, y).then(|| {
                    Pixel(
                        self.top_left + Point::new(x as i32, y as i32),
                        BinaryColor::On,
                    )
                })
            })
        });
        target.draw_iter(pixels)
    }
}
