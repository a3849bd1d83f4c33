//! Arcade panel firmware library.
//!
//! Exposes the protocol, display and driver layers for integration testing
//! on the host. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod pins;
