//! Parser implementation for 3b files
//!
//! The [`ChunkStreamParser`] walks a fully loaded file: it checks the 8-byte
//! header, then visits chunks one by one until it decodes the first volume
//! chunk or runs out of bytes.

use binrw::{BinRead, Endian};
use std::io::Cursor;

use crate::chunk::{CHUNK_HEADER_SIZE, ChunkHeader, ChunkRecord, ChunkTag};
use crate::config::{HeaderPolicy, ParserConfig};
use crate::error::{Result, ThreeBError};
use crate::header::{FileHeader, HEADER_SIZE};
use crate::observer::{LogObserver, ParseEvent, ParseObserver};

/// Width of the version field at the start of a volume payload
pub const VOLUME_VERSION_SIZE: usize = 4;

/// The decoded part of the first volume chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeInfo {
    /// Offset of the `VOL3` tag
    pub offset: usize,
    /// Size field of the volume chunk
    pub declared_size: u32,
    /// Format revision of the embedded volume data
    pub version: u32,
}

/// Everything learned from one pass over a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseResult {
    /// Magic matched the configured value
    pub header_magic_ok: bool,
    /// Sanity marker equalled 1
    pub header_sanity_ok: bool,
    /// Every chunk visited, in file order, including the volume chunk
    pub chunks: Vec<ChunkRecord>,
    /// The first volume chunk, if one was found
    pub volume: Option<VolumeInfo>,
}

impl ParseResult {
    /// Version of the first volume chunk
    pub fn volume_version(&self) -> Option<u32> {
        self.volume.map(|v| v.version)
    }

    /// Whether both header checks passed
    pub fn header_ok(&self) -> bool {
        self.header_magic_ok && self.header_sanity_ok
    }

    /// Chunks other than the volume chunk
    pub fn unknown_chunks(&self) -> impl Iterator<Item = &ChunkRecord> {
        self.chunks.iter().filter(|c| !c.tag.is_volume())
    }

    /// Records carrying the given tag
    pub fn chunks_with_tag(&self, tag: ChunkTag) -> impl Iterator<Item = &ChunkRecord> {
        self.chunks.iter().filter(move |c| c.tag == tag)
    }

    /// Serialize the result as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A parse that keeps whatever was decoded before an error
#[derive(Debug)]
pub struct ScanOutcome {
    /// Header flags and chunks decoded before the walk stopped
    pub result: ParseResult,
    /// Why the walk stopped early, if it did
    pub error: Option<ThreeBError>,
}

impl ScanOutcome {
    /// Whether the walk finished without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the buffer was too short to hold the file header.
    ///
    /// The header flags in `result` are meaningless in that case.
    pub fn header_truncated(&self) -> bool {
        matches!(
            self.error,
            Some(ThreeBError::TruncatedInput { offset: 0, .. })
        )
    }
}

/// Bounds-checked reader over the input buffer
struct ChunkCursor<'a> {
    inner: Cursor<&'a [u8]>,
    endian: Endian,
}

impl<'a> ChunkCursor<'a> {
    fn new(buffer: &'a [u8], endian: Endian) -> Self {
        Self {
            inner: Cursor::new(buffer),
            endian,
        }
    }

    fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    fn position(&self) -> usize {
        self.inner.position() as usize
    }

    fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Read a `T` occupying `width` bytes, failing before touching the buffer
    /// if fewer than `width` bytes remain.
    fn read<T>(&mut self, width: usize) -> Result<T>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        if self.remaining() < width {
            return Err(ThreeBError::truncated(self.position(), width, self.len()));
        }
        Ok(T::read_options(&mut self.inner, self.endian, ())?)
    }

    fn seek_to(&mut self, position: usize) {
        debug_assert!(position >= self.position());
        self.inner.set_position(position as u64);
    }
}

/// Parser for 3b chunk streams
///
/// # Examples
///
/// ```
/// use vol_3b::builder::ThreeBBuilder;
/// use vol_3b::parser::ChunkStreamParser;
///
/// let data = ThreeBBuilder::new()
///     .chunk(*b"META", vec![0; 12])
///     .volume(3, Vec::new())
///     .build()
///     .unwrap();
///
/// let result = ChunkStreamParser::new().parse(&data).unwrap();
/// assert!(result.header_ok());
/// assert_eq!(result.chunks.len(), 2);
/// assert_eq!(result.volume_version(), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkStreamParser {
    config: ParserConfig,
}

impl ChunkStreamParser {
    /// Creates a parser with the default (lenient, little-endian) settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given settings
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Gets the parser settings
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a complete file held in memory, tracing through `log`
    pub fn parse(&self, buffer: &[u8]) -> Result<ParseResult> {
        self.parse_with_observer(buffer, &mut LogObserver)
    }

    /// Parses a complete file, reporting progress to `observer`
    pub fn parse_with_observer<O>(&self, buffer: &[u8], observer: &mut O) -> Result<ParseResult>
    where
        O: ParseObserver + ?Sized,
    {
        let mut result = ParseResult::default();
        self.walk(buffer, &mut result, observer)?;
        Ok(result)
    }

    /// Parses as far as possible, returning partial results alongside the
    /// error that stopped the walk
    pub fn scan(&self, buffer: &[u8]) -> ScanOutcome {
        let mut result = ParseResult::default();
        let error = self.walk(buffer, &mut result, &mut LogObserver).err();
        ScanOutcome { result, error }
    }

    fn walk<O>(&self, buffer: &[u8], result: &mut ParseResult, observer: &mut O) -> Result<()>
    where
        O: ParseObserver + ?Sized,
    {
        let len = buffer.len();
        if len as u64 > self.config.max_buffer_size {
            return Err(ThreeBError::BufferTooLarge {
                size: len as u64,
                limit: self.config.max_buffer_size,
            });
        }

        let mut cursor = ChunkCursor::new(buffer, self.config.byte_order.endian());

        let header: FileHeader = cursor.read(HEADER_SIZE)?;
        let check = header.check(&self.config.magic);
        result.header_magic_ok = check.magic_ok;
        result.header_sanity_ok = check.sanity_ok;
        observer.observe(&ParseEvent::Header(&check));

        if self.config.header_policy == HeaderPolicy::Strict {
            if !check.magic_ok {
                return Err(ThreeBError::InvalidMagic {
                    expected: self.config.magic,
                    found: header.magic,
                });
            }
            if !check.sanity_ok {
                return Err(ThreeBError::InvalidSanityMarker(header.sanity));
            }
        }

        while cursor.remaining() > 0 {
            if result.chunks.len() >= self.config.max_chunks {
                return Err(ThreeBError::ChunkLimitExceeded(self.config.max_chunks));
            }

            let offset = cursor.position();
            let chunk: ChunkHeader = cursor.read(CHUNK_HEADER_SIZE)?;
            let record = ChunkRecord {
                tag: chunk.tag,
                declared_size: chunk.size,
                offset,
            };
            result.chunks.push(record);
            observer.observe(&ParseEvent::Chunk(&record));

            if chunk.tag.is_volume() {
                // Only the first volume chunk is decoded
                let version: u32 = cursor.read(VOLUME_VERSION_SIZE)?;
                let volume = VolumeInfo {
                    offset,
                    declared_size: chunk.size,
                    version,
                };
                observer.observe(&ParseEvent::Volume(&volume));
                result.volume = Some(volume);
                break;
            }

            let payload_offset = record.payload_offset();
            if chunk.size as usize > len - payload_offset {
                return Err(ThreeBError::OutOfBoundsSkip {
                    offset: payload_offset,
                    skip: u64::from(chunk.size),
                    len,
                });
            }

            let next = record.next_offset();
            if next > len {
                log::debug!(
                    "Skip gap after chunk {} at 0x{:08X} runs past end of buffer",
                    chunk.tag,
                    offset
                );
            }
            cursor.seek_to(next.min(len));
        }

        observer.observe(&ParseEvent::Finished {
            chunks: result.chunks.len(),
            offset: cursor.position(),
        });
        Ok(())
    }
}
