//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters. All tests run on the host with no real hardware
//! required (`cargo test --no-default-features`).

mod interpreter_tests;
mod mock_hw;
