//! Screen composer.
//!
//! Each [`Screen`] is a fixed sequence of [`DisplaySurface`] calls. Layout
//! coordinates are those of the panel artwork; the composed frames share
//! a "main" header (top frame, status banner, two stars) and most add the
//! bottom frame plus a per-screen decoration.

use super::assets::Bitmap;
use crate::app::ports::{DisplaySurface, TextAlign};

/// Horizontal centre of the panel.
const CENTER_X: i32 = super::framebuffer::WIDTH as i32 / 2;

/// Handshake progress bar placement.
pub const PROGRESS_BAR: (i32, i32, u32, u32) = (5, 42, 116, 10);

/// Named screens the interpreter can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Logo splash shown once at boot.
    Loading,
    /// Host link not yet established.
    Waiting,
    /// Handshake complete.
    Ready,
    Starting,
    /// Stopping decorations over the joystick row of the slot model.
    Stopping([bool; 4]),
    Stopped,
    /// Joystick icons, lit per connected slot.
    Joysticks([bool; 4]),
    /// Handshake step progress (percent).
    Progress(u8),
}

/// How a frame begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStart {
    /// Blank the buffer first.
    Clear,
    /// Draw over whatever the previous frame left behind.
    Overlay,
}

/// Compose `screen` into the buffer and present it. Stars in the header are
/// drawn white when `stars_lit`, black otherwise.
pub fn show(surface: &mut impl DisplaySurface, screen: Screen, stars_lit: bool, start: FrameStart) {
    if start == FrameStart::Clear {
        surface.clear();
    }
    compose(surface, screen, stars_lit);
    surface.present();
}

/// Issue the draw calls for `screen` without clearing or presenting.
pub fn compose(surface: &mut impl DisplaySurface, screen: Screen, stars_lit: bool) {
    match screen {
        Screen::Loading => loading(surface),
        Screen::Waiting => {
            status(surface, stars_lit);
            surface.draw_bitmap(4, 38, Bitmap::LinkConnecting);
        }
        Screen::Ready => {
            status(surface, stars_lit);
            surface.draw_bitmap(4, 38, Bitmap::LinkConnected);
        }
        Screen::Starting => {
            status(surface, stars_lit);
            surface.draw_bitmap(6, 39, Bitmap::Rocket);
            surface.draw_bitmap(109, 39, Bitmap::Rocket);
            surface.draw_bitmap(25, 43, Bitmap::StartingLabel);
        }
        Screen::Stopping(slots) => {
            status(surface, stars_lit);
            joystick_row(surface, slots);
            surface.draw_bitmap(4, 41, Bitmap::Zzz);
            surface.draw_bitmap(107, 41, Bitmap::Zzz);
            surface.draw_bitmap(24, 43, Bitmap::StoppingLabel);
        }
        Screen::Stopped => {
            status(surface, stars_lit);
            surface.draw_bitmap(4, 42, Bitmap::Bye);
            surface.draw_bitmap(104, 42, Bitmap::Bye);
            surface.draw_bitmap(27, 43, Bitmap::StoppedLabel);
        }
        Screen::Joysticks(slots) => {
            header(surface, stars_lit);
            joystick_row(surface, slots);
        }
        Screen::Progress(percent) => {
            status(surface, stars_lit);
            let (x, y, w, h) = PROGRESS_BAR;
            surface.draw_progress_bar(x, y, w, h, percent);
        }
    }
}

fn loading(surface: &mut impl DisplaySurface) {
    surface.draw_bitmap(29, 10, Bitmap::Logo);
    surface.draw_text(CENTER_X, 37, "AZWAY RETRO", TextAlign::Center);
    surface.draw_text(CENTER_X, 52, "Only Retrogaming", TextAlign::Center);
}

fn header(surface: &mut impl DisplaySurface, stars_lit: bool) {
    surface.draw_bitmap(0, 0, Bitmap::FrameTop);
    surface.draw_bitmap(32, 11, Bitmap::StatusBanner);
    let star = if stars_lit {
        Bitmap::StarWhite
    } else {
        Bitmap::StarBlack
    };
    surface.draw_bitmap(6, 8, star);
    surface.draw_bitmap(106, 8, star);
}

fn joystick_row(surface: &mut impl DisplaySurface, slots: [bool; 4]) {
    for (slot, connected) in slots.into_iter().enumerate() {
        let icon = if connected {
            Bitmap::JoystickOn(slot as u8)
        } else {
            Bitmap::JoystickOff(slot as u8)
        };
        surface.draw_bitmap(slot as i32 * 32, 32, icon);
    }
}

fn status(surface: &mut impl DisplaySurface, stars_lit: bool) {
    header(surface, stars_lit);
    surface.draw_bitmap(0, 32, Bitmap::FrameBottom);
}
