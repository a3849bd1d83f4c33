//! Panel configuration parameters
//!
//! Timings and behavioural switches for the arcade panel. Defaults match
//! the shipped firmware; a JSON override can be baked in at build time via
//! the `PANEL_CONFIG_JSON` environment variable (see [`PanelConfig::load`]).

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Minimum gap between relay groups when opening them all. Switching every
/// coil at once browns out the 5 V rail.
pub const MIN_DISCONNECT_STAGGER_MS: u32 = 500;

/// How joystick slots map onto the eight relay outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayAddressing {
    /// Slot n drives outputs 2n and 2n+1 together.
    Paired,
    /// Slot n drives output n alone; outputs are written as a bitmask.
    Individual,
}

/// Lower bound applied to a negative player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerClampFloor {
    Zero,
    One,
}

impl PlayerClampFloor {
    pub const fn value(self) -> i32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// How the ready screen is drawn at the end of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyTransition {
    /// Clear the buffer first, like every other screen.
    Clear,
    /// Draw over the last progress frame without clearing.
    Overlay,
}

/// Core panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    // --- Relays ---
    pub relay_addressing: RelayAddressing,
    /// True when a HIGH output energises the relay coil.
    pub relay_active_high: bool,
    /// Delay between the two relays of one slot during the handshake (ms)
    pub inter_relay_delay_ms: u32,
    /// Gap between relay groups in `disconnect_all` (ms)
    pub disconnect_stagger_ms: u32,

    // --- Protocol ---
    pub clamp_floor: PlayerClampFloor,
    pub ready_transition: ReadyTransition,

    // --- Timing ---
    /// Settling time after enabling the external rail (ms)
    pub power_settle_ms: u32,
    /// Loading screen hold at boot (ms)
    pub boot_splash_ms: u32,
    /// Hold after each handshake step (ms)
    pub init_step_hold_ms: u32,
    /// Sleep between empty serial polls (ms)
    pub serial_poll_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            // Relays
            relay_addressing: RelayAddressing::Paired,
            relay_active_high: true,
            inter_relay_delay_ms: 250,
            disconnect_stagger_ms: MIN_DISCONNECT_STAGGER_MS,

            // Protocol
            clamp_floor: PlayerClampFloor::Zero,
            ready_transition: ReadyTransition::Clear,

            // Timing
            power_settle_ms: 100,
            boot_splash_ms: 10_000,
            init_step_hold_ms: 2_000,
            serial_poll_ms: 10,
        }
    }
}

impl PanelConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON override"))?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time override if `PANEL_CONFIG_JSON` was set, defaults otherwise.
    pub fn load() -> Result<Self, Error> {
        match option_env!("PANEL_CONFIG_JSON") {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the hardware cannot tolerate.
    pub fn validate(&self) -> Result<(), Error> {
        if self.disconnect_stagger_ms < MIN_DISCONNECT_STAGGER_MS {
            return Err(Error::Config("disconnect_stagger_ms below 500 ms"));
        }
        if self.serial_poll_ms == 0 {
            return Err(Error::Config("serial_poll_ms must be non-zero"));
        }
        Ok(())
    }
}
