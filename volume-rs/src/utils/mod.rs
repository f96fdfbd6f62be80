//! Shared utilities for the volume-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
