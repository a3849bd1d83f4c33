//! OLED display stack.
//!
//! ```text
//!   screens ──▶ DisplaySurface ──▶ GraphicsSurface ──▶ FrameTarget (SSD1306 | MemoryFrame)
//! ```

pub mod assets;
pub mod framebuffer;
pub mod screens;
pub mod surface;
pub mod xbm;

pub use assets::{AssetSource, Bitmap, NoAssets};
pub use framebuffer::{FrameTarget, MemoryFrame};
pub use screens::{FrameStart, Screen};
pub use surface::GraphicsSurface;
