//! Panel power sequencing: the external peripheral rail (Vext) and the
//! OLED reset line.
//!
//! Heltec boards gate the OLED supply behind Vext, a P-channel switch that
//! is ON when the pin is driven LOW. DevKit boards have neither line, so
//! both are optional.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::error::{Error, Result};

pub struct PanelPower<V, R> {
    vext: Option<V>,
    oled_reset: Option<R>,
}

impl<V: OutputPin, R: OutputPin> PanelPower<V, R> {
    pub fn new(vext: Option<V>, oled_reset: Option<R>) -> Self {
        Self { vext, oled_reset }
    }

    /// Switch the external rail on and wait `settle_ms` for it to stabilise.
    pub fn power_on(&mut self, settle_ms: u32, delay: &mut impl DelayNs) -> Result<()> {
        if let Some(pin) = self.vext.as_mut() {
            pin.set_low().map_err(|_| Error::Init("Vext enable"))?;
            info!("Vext ON");
        }
        delay.delay_ms(settle_ms);
        Ok(())
    }

    /// Switch the external rail off.
    pub fn power_off(&mut self) -> Result<()> {
        if let Some(pin) = self.vext.as_mut() {
            pin.set_high().map_err(|_| Error::Init("Vext disable"))?;
            info!("Vext OFF");
        }
        Ok(())
    }

    /// Pulse the OLED reset line (high, low 20 ms, high). No-op without a
    /// reset pin.
    pub fn reset_oled(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        let Some(pin) = self.oled_reset.as_mut() else {
            return Ok(());
        };
        pin.set_high().map_err(|_| Error::Init("OLED reset"))?;
        delay.delay_ms(1);
        pin.set_low().map_err(|_| Error::Init("OLED reset"))?;
        delay.delay_ms(20);
        pin.set_high().map_err(|_| Error::Init("OLED reset"))?;
        delay.delay_ms(20);
        Ok(())
    }
}
