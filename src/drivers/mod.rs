//! Peripheral drivers, written against `embedded-hal` traits so they run
//! unchanged on the host.

pub mod power;
pub mod relay;
pub mod status_led;
pub mod task_pin;
