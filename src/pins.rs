//! GPIO / peripheral pin assignments for the supported boards.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. Pins 0, 1, 3 and the flash pins are strapping or
//! console pins on ESP32 parts; moving anything there can brick flashing.

/// Complete pin map for one board revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPins {
    pub name: &'static str,

    // -- OLED (SSD1306 over I²C) --
    pub i2c_sda: i32,
    pub i2c_scl: i32,
    /// OLED reset line, `None` when the module resets itself on power-up.
    pub oled_reset: Option<i32>,

    // -- Joystick relays, in slot order (slot n = relays 2n, 2n+1) --
    pub relays: [i32; 8],

    // -- Status LED --
    pub status_led: i32,

    /// External peripheral rail enable (active LOW), Heltec boards only.
    pub vext: Option<i32>,

    // -- Host serial (UART0) --
    pub uart_tx: i32,
    pub uart_rx: i32,
}

// ---------------------------------------------------------------------------
// Heltec WiFi Kit 32 V3 (ESP32-S3, on-board OLED)
// ---------------------------------------------------------------------------

pub const HELTEC_V3: BoardPins = BoardPins {
    name: "heltec-v3",
    i2c_sda: 17,
    i2c_scl: 18,
    oled_reset: Some(21),
    relays: [7, 6, 5, 4, 3, 2, 26, 48],
    status_led: 35,
    vext: Some(36),
    uart_tx: 43,
    uart_rx: 44,
};

// ---------------------------------------------------------------------------
// Generic ESP32 DevKit (external OLED module)
// ---------------------------------------------------------------------------

pub const DEVKIT: BoardPins = BoardPins {
    name: "esp32-devkit",
    i2c_sda: 21,
    i2c_scl: 22,
    oled_reset: None,
    relays: [15, 2, 4, 16, 17, 5, 18, 19],
    status_led: 2,
    vext: None,
    uart_tx: 1,
    uart_rx: 3,
};

/// The board this firmware image is built for.
#[cfg(not(feature = "devkit"))]
pub const BOARD: BoardPins = HELTEC_V3;

/// The board this firmware image is built for.
#[cfg(feature = "devkit")]
pub const BOARD: BoardPins = DEVKIT;

// ---------------------------------------------------------------------------
// Bus parameters
// ---------------------------------------------------------------------------

/// SSD1306 7-bit I²C address.
pub const OLED_I2C_ADDR: u8 = 0x3C;
/// Host serial baud rate.
pub const UART_BAUD: u32 = 115_200;
