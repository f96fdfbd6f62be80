//! Chunk tags, chunk headers and the records produced while walking a file

use binrw::{BinRead, BinWrite};
use std::fmt;
use std::ops::Range;

/// Width of a chunk tag
pub const TAG_SIZE: usize = 4;

/// Width of the size field after the tag
pub const SIZE_FIELD_SIZE: usize = 4;

/// Size of a chunk header (tag + size field)
pub const CHUNK_HEADER_SIZE: usize = TAG_SIZE + SIZE_FIELD_SIZE;

/// Extra bytes that follow every skipped chunk payload.
///
/// Files in the wild place one tag-width gap after each non-volume payload, so
/// the next tag starts at `offset + CHUNK_HEADER_SIZE + size + SKIP_GAP`. The
/// purpose of the gap is unknown; it may be a writer defect.
pub const SKIP_GAP: usize = TAG_SIZE;

/// A 4-byte chunk identifier, compared byte for byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BinRead, BinWrite)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkTag {
    /// Raw tag bytes in file order
    pub bytes: [u8; 4],
}

impl ChunkTag {
    /// The volume chunk tag
    pub const VOL3: Self = Self::from_bytes(*b"VOL3");

    /// Create a tag from bytes in file order
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }

    /// Whether this is the volume chunk
    pub fn is_volume(&self) -> bool {
        *self == Self::VOL3
    }

    /// Short human readable description of the tag
    pub fn description(&self) -> &'static str {
        if self.is_volume() {
            "Volume data"
        } else {
            "Unknown chunk"
        }
    }
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bytes {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

/// A chunk header containing the tag and declared payload size
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
pub struct ChunkHeader {
    /// The chunk identifier
    pub tag: ChunkTag,
    /// Payload bytes following the size field
    pub size: u32,
}

/// A chunk visited while walking a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkRecord {
    /// The chunk identifier
    pub tag: ChunkTag,
    /// Size field as stored in the file
    pub declared_size: u32,
    /// Offset of the tag from the start of the buffer
    pub offset: usize,
}

impl ChunkRecord {
    /// Offset of the first payload byte
    pub fn payload_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_SIZE
    }

    /// Byte range of the payload as declared by the size field
    pub fn payload_range(&self) -> Range<usize> {
        let start = self.payload_offset();
        start..start + self.declared_size as usize
    }

    /// Byte range covering the header and declared payload, without the gap
    pub fn byte_range(&self) -> Range<usize> {
        self.offset..self.payload_range().end
    }

    /// Offset of the next tag when this chunk is skipped
    pub fn next_offset(&self) -> usize {
        self.payload_range().end + SKIP_GAP
    }
}
