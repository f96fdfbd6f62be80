//! Volume-RS library
//!
//! Command definitions and display helpers shared by the `volume-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
