//! Parser configuration

use binrw::Endian;
use std::fmt;

use crate::header::THREEB_MAGIC;

/// Default upper bound on the number of chunks visited in one parse
pub const DEFAULT_MAX_CHUNKS: usize = 1 << 20;

/// Default upper bound on the input buffer size (4 GiB)
pub const DEFAULT_MAX_BUFFER_SIZE: u64 = 1 << 32;

/// What to do when the header magic or sanity marker is wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderPolicy {
    /// Report the mismatch and keep parsing
    #[default]
    Lenient,
    /// Abort with an error
    Strict,
}

/// Byte order of the integer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Little-endian, the byte order of every known producer
    #[default]
    Little,
    /// Big-endian
    Big,
    /// Byte order of the host running the parser
    Native,
}

impl ByteOrder {
    /// The binrw endianness for this byte order
    pub fn endian(self) -> Endian {
        match self {
            Self::Little => Endian::Little,
            Self::Big => Endian::Big,
            Self::Native => {
                if cfg!(target_endian = "big") {
                    Endian::Big
                } else {
                    Endian::Little
                }
            }
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Little => write!(f, "little-endian"),
            Self::Big => write!(f, "big-endian"),
            Self::Native => write!(f, "native"),
        }
    }
}

/// Settings for [`ChunkStreamParser`](crate::parser::ChunkStreamParser)
///
/// # Examples
///
/// ```
/// use vol_3b::config::{ByteOrder, HeaderPolicy, ParserConfig};
///
/// let config = ParserConfig::default()
///     .strict()
///     .with_byte_order(ByteOrder::Big)
///     .with_max_chunks(64);
/// assert_eq!(config.header_policy, HeaderPolicy::Strict);
/// assert_eq!(config.max_chunks, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Header mismatch handling
    pub header_policy: HeaderPolicy,
    /// Byte order of the sanity marker, chunk sizes and volume version
    pub byte_order: ByteOrder,
    /// Expected magic at offset 0
    pub magic: [u8; 4],
    /// Maximum number of chunk records before giving up
    pub max_chunks: usize,
    /// Maximum accepted buffer length
    pub max_buffer_size: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_policy: HeaderPolicy::default(),
            byte_order: ByteOrder::default(),
            magic: THREEB_MAGIC,
            max_chunks: DEFAULT_MAX_CHUNKS,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }
}

impl ParserConfig {
    /// Abort on header mismatches
    pub fn strict(self) -> Self {
        self.with_header_policy(HeaderPolicy::Strict)
    }

    /// Set the header policy
    pub fn with_header_policy(mut self, header_policy: HeaderPolicy) -> Self {
        self.header_policy = header_policy;
        self
    }

    /// Set the byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Set the expected magic
    pub fn with_magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    /// Set the chunk limit
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Set the buffer size limit
    pub fn with_max_buffer_size(mut self, max_buffer_size: u64) -> Self {
        self.max_buffer_size = max_buffer_size;
        self
    }
}
