//! Application core: the serial protocol and the state it drives.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod commands;
pub mod events;
pub mod interpreter;
pub mod ports;

pub use interpreter::{CommandInterpreter, JoystickSlot, Readiness, Reply};
