//! Bitmap asset catalogue.
//!
//! The panel artwork is a set of fixed-size XBM images (1 bit per pixel,
//! rows padded to whole bytes, least-significant bit leftmost). This module
//! names each image and records its geometry; the bytes themselves come
//! from an [`AssetSource`] so the art pack can ship separately from the
//! firmware logic.

use embedded_graphics::geometry::Size;

/// Every image the screens can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitmap {
    Logo,
    FrameTop,
    FrameBottom,
    StatusBanner,
    StarBlack,
    StarWhite,
    LinkConnected,
    LinkConnecting,
    /// Joystick icon for a slot (0..4), lit variant.
    JoystickOn(u8),
    /// Joystick icon for a slot (0..4), dark variant.
    JoystickOff(u8),
    Rocket,
    StartingLabel,
    Zzz,
    StoppingLabel,
    StoppedLabel,
    Bye,
}

impl Bitmap {
    /// Pixel dimensions of the image.
    pub const fn size(self) -> Size {
        let (w, h) = match self {
            Self::Logo => (70, 25),
            Self::FrameTop | Self::FrameBottom => (128, 32),
            Self::StatusBanner => (63, 10),
            Self::StarBlack | Self::StarWhite => (16, 15),
            Self::LinkConnected | Self::LinkConnecting => (120, 22),
            Self::JoystickOn(_) | Self::JoystickOff(_) => (32, 32),
            Self::Rocket => (14, 19),
            Self::StartingLabel | Self::StoppingLabel => (80, 10),
            Self::Zzz => (17, 15),
            Self::StoppedLabel => (74, 10),
            Self::Bye => (20, 14),
        };
        Size::new(w, h)
    }

    /// Number of bytes an XBM of this size occupies.
    pub const fn xbm_len(self) -> usize {
        let size = self.size();
        size.width.div_ceil(8) as usize * size.height as usize
    }
}

/// Supplies XBM bytes for a [`Bitmap`].
pub trait AssetSource {
    /// `None` when the image is not available in this build.
    fn xbm(&self, bitmap: Bitmap) -> Option<&'static [u8]>;
}

/// Asset source for builds without the art pack. Every image renders as
/// its bounding outline.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn xbm(&self, _bitmap: Bitmap) -> Option<&'static [u8]> {
        None
    }
}
