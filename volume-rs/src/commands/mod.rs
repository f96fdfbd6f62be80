//! Command implementations for each file format

pub mod threeb;
