//! Joystick relay bank.
//!
//! Eight GPIO outputs switch the joystick and button lines through to the
//! arcade cabinet. Slots map onto outputs according to
//! [`RelayAddressing`]:
//!
//! - `Paired`: slot n drives outputs 2n and 2n+1.
//! - `Individual`: slot n drives output n; the bank is written as a
//!   bitmask where bit i is output i.
//!
//! The bank tracks the *logical* state of every output (true = energised,
//! line connected) and translates to electrical levels with
//! `relay_active_high`.

use core::ops::Range;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::config::{PanelConfig, RelayAddressing};
use crate::error::Error;

/// Number of relay outputs on the board.
pub const RELAY_COUNT: usize = 8;
/// Number of joystick slots.
pub const SLOT_COUNT: usize = 4;
/// Outputs switched together by `disconnect_all` before each stagger gap.
const DISCONNECT_GROUP: usize = 2;

pub struct RelayBank<P> {
    outputs: [P; RELAY_COUNT],
    energised: [bool; RELAY_COUNT],
    addressing: RelayAddressing,
    active_high: bool,
    inter_relay_delay_ms: u32,
    stagger_ms: u32,
}

impl<P: OutputPin> RelayBank<P> {
    /// Take ownership of the outputs. Electrical state is left untouched
    /// until the first write; boot code calls `disconnect_all` to force a
    /// known state.
    pub fn new(outputs: [P; RELAY_COUNT], config: &PanelConfig) -> Self {
        Self {
            outputs,
            energised: [false; RELAY_COUNT],
            addressing: config.relay_addressing,
            active_high: config.relay_active_high,
            inter_relay_delay_ms: config.inter_relay_delay_ms,
            stagger_ms: config.disconnect_stagger_ms,
        }
    }

    /// Output indices belonging to `slot`.
    pub fn outputs_of(&self, slot: usize) -> Range<usize> {
        match self.addressing {
            RelayAddressing::Paired => 2 * slot..2 * slot + 2,
            RelayAddressing::Individual => slot..slot + 1,
        }
    }

    /// Logical state of every output.
    pub fn energised(&self) -> [bool; RELAY_COUNT] {
        self.energised
    }

    /// Logical state as a bitmask, bit i = output i.
    pub fn mask(&self) -> u8 {
        self.energised
            .iter()
            .enumerate()
            .fold(0, |m, (i, &on)| if on { m | 1 << i } else { m })
    }

    fn write(&mut self, index: usize, energise: bool) {
        let high = energise == self.active_high;
        let pin = &mut self.outputs[index];
        let res = if high { pin.set_high() } else { pin.set_low() };
        if res.is_err() {
            warn!("relay {}: {}", index + 1, Error::Gpio("relay write failed"));
        }
        self.energised[index] = energise;
    }

    /// Write all eight outputs from a bitmask.
    pub fn apply_mask(&mut self, mask: u8) {
        for index in 0..RELAY_COUNT {
            self.write(index, mask & (1 << index) != 0);
        }
    }

    fn valid(&self, slot: usize) -> bool {
        if slot < SLOT_COUNT {
            true
        } else {
            warn!("relay: slot {} out of range", slot);
            false
        }
    }

    /// Drive every output of `slot` to the same state at once.
    pub fn set_slot(&mut self, slot: usize, connected: bool) {
        if !self.valid(slot) {
            return;
        }
        match self.addressing {
            RelayAddressing::Paired => {
                for index in self.outputs_of(slot) {
                    self.write(index, connected);
                }
            }
            RelayAddressing::Individual => {
                let bit = 1u8 << slot;
                let mask = if connected {
                    self.mask() | bit
                } else {
                    self.mask() & !bit
                };
                self.apply_mask(mask);
            }
        }
    }

    /// Energise the outputs of `slot` one at a time, pausing between them.
    pub fn energize_slot(&mut self, slot: usize, delay: &mut impl DelayNs) {
        if !self.valid(slot) {
            return;
        }
        for (n, index) in self.outputs_of(slot).enumerate() {
            if n > 0 {
                delay.delay_ms(self.inter_relay_delay_ms);
            }
            self.write(index, true);
        }
        debug!("relay: slot {} energised", slot);
    }

    /// Open every output, two at a time, with the stagger between groups.
    pub fn disconnect_all(&mut self, delay: &mut impl DelayNs) {
        for group in 0..RELAY_COUNT / DISCONNECT_GROUP {
            if group > 0 {
                delay.delay_ms(self.stagger_ms);
            }
            let start = group * DISCONNECT_GROUP;
            for index in start..start + DISCONNECT_GROUP {
                self.write(index, false);
            }
        }
        debug!("relay: all open");
    }
}
