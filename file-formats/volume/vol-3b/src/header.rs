//! The fixed 8-byte file header

use binrw::{BinRead, BinWrite};

/// Size of the file header (magic + sanity marker)
pub const HEADER_SIZE: usize = 8;

/// Default magic at the start of every 3b file
pub const THREEB_MAGIC: [u8; 4] = *b"3BVF";

/// Value expected in the sanity marker
pub const SANITY_MARKER: u32 = 1;

/// The file header as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
pub struct FileHeader {
    /// Format magic, compared verbatim
    pub magic: [u8; 4],
    /// Expected to be [`SANITY_MARKER`]
    pub sanity: u32,
}

impl FileHeader {
    /// Create a well-formed header with the given magic
    pub fn new(magic: [u8; 4]) -> Self {
        Self {
            magic,
            sanity: SANITY_MARKER,
        }
    }

    /// Compare both fields against their expected values
    pub fn check(&self, expected_magic: &[u8; 4]) -> HeaderCheck {
        HeaderCheck {
            magic_ok: self.magic == *expected_magic,
            sanity_ok: self.sanity == SANITY_MARKER,
            magic: self.magic,
            sanity: self.sanity,
        }
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new(THREEB_MAGIC)
    }
}

/// Outcome of header validation; each field is checked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCheck {
    /// Magic matched the configured value
    pub magic_ok: bool,
    /// Sanity marker equalled 1
    pub sanity_ok: bool,
    /// Magic bytes found in the file
    pub magic: [u8; 4],
    /// Sanity marker found in the file
    pub sanity: u32,
}

impl HeaderCheck {
    /// Both checks passed
    pub fn is_valid(&self) -> bool {
        self.magic_ok && self.sanity_ok
    }
}
