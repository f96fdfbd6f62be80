//! Builder for writing 3b files
//!
//! Produces files laid out the way the parser expects: the 8-byte header,
//! then chunks. Every non-volume chunk is followed by [`SKIP_GAP`] zero bytes.

use binrw::BinWrite;
use std::io::{Cursor, Seek, Write};

use crate::chunk::{ChunkHeader, ChunkTag, SKIP_GAP};
use crate::config::ByteOrder;
use crate::error::{Result, ThreeBError};
use crate::header::{FileHeader, THREEB_MAGIC};
use crate::parser::VOLUME_VERSION_SIZE;

#[derive(Debug, Clone)]
enum Entry {
    Chunk { tag: ChunkTag, payload: Vec<u8> },
    Volume { version: u32, payload: Vec<u8> },
    Raw(Vec<u8>),
}

/// Assembles a 3b file chunk by chunk
///
/// # Examples
///
/// ```
/// use vol_3b::builder::ThreeBBuilder;
///
/// let data = ThreeBBuilder::new()
///     .chunk(*b"DESC", b"volume".to_vec())
///     .volume(2, vec![0; 16])
///     .build()
///     .unwrap();
///
/// // header + DESC (8 + 6 + 4 gap) + VOL3 (8 + 4 + 16)
/// assert_eq!(data.len(), 8 + 18 + 28);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeBBuilder {
    header: FileHeader,
    byte_order: ByteOrder,
    entries: Vec<Entry>,
}

impl Default for ThreeBBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreeBBuilder {
    /// Create a builder with a valid little-endian header
    pub fn new() -> Self {
        Self {
            header: FileHeader::new(THREEB_MAGIC),
            byte_order: ByteOrder::Little,
            entries: Vec::new(),
        }
    }

    /// Set the byte order used for every integer field
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Override the header magic
    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.header.magic = magic;
        self
    }

    /// Override the header sanity marker
    pub fn sanity(mut self, sanity: u32) -> Self {
        self.header.sanity = sanity;
        self
    }

    /// Append a chunk followed by the skip gap
    pub fn chunk(mut self, tag: impl Into<ChunkTag>, payload: Vec<u8>) -> Self {
        self.entries.push(Entry::Chunk {
            tag: tag.into(),
            payload,
        });
        self
    }

    /// Append a volume chunk; its size field covers the version and payload
    pub fn volume(mut self, version: u32, payload: Vec<u8>) -> Self {
        self.entries.push(Entry::Volume { version, payload });
        self
    }

    /// Append bytes verbatim, for hand-crafted or damaged files
    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.entries.push(Entry::Raw(bytes));
        self
    }

    /// Encode the file into a new buffer
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Encode the file into `writer`
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        let endian = self.byte_order.endian();
        self.header.write_options(writer, endian, ())?;

        for entry in &self.entries {
            match entry {
                Entry::Chunk { tag, payload } => {
                    ChunkHeader {
                        tag: *tag,
                        size: payload_size(payload.len())?,
                    }
                    .write_options(writer, endian, ())?;
                    writer.write_all(payload)?;
                    writer.write_all(&[0u8; SKIP_GAP])?;
                }
                Entry::Volume { version, payload } => {
                    ChunkHeader {
                        tag: ChunkTag::VOL3,
                        size: payload_size(VOLUME_VERSION_SIZE + payload.len())?,
                    }
                    .write_options(writer, endian, ())?;
                    version.write_options(writer, endian, ())?;
                    writer.write_all(payload)?;
                }
                Entry::Raw(bytes) => writer.write_all(bytes)?,
            }
        }

        Ok(())
    }
}

fn payload_size(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        ThreeBError::ValidationError(format!("Chunk payload of {} bytes is too large", len))
    })
}
