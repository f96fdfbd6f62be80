//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a buffer offset the way chunk listings show it
pub fn format_offset(offset: usize) -> String {
    format!("0x{offset:08X}")
}

/// Format a header check result
pub fn format_check(ok: bool) -> &'static str {
    if ok { "ok" } else { "MISMATCH" }
}
