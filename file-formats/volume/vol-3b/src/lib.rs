//! Parser for chunked "3b" volume container files.
//!
//! A 3b file starts with an 8-byte header (magic plus a sanity integer that
//! must be 1) followed by tagged, length-prefixed chunks. The parser walks the
//! chunks without knowing their number, order or types in advance and stops
//! at the first `VOL3` volume chunk, reporting its version field.
//!
//! # Examples
//!
//! ```
//! use vol_3b::builder::ThreeBBuilder;
//!
//! let data = ThreeBBuilder::new()
//!     .chunk(*b"INFO", vec![1, 2, 3])
//!     .volume(5, Vec::new())
//!     .build()
//!     .unwrap();
//!
//! let result = vol_3b::parse(&data).unwrap();
//! assert_eq!(result.volume_version(), Some(5));
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod builder;
pub mod chunk;
pub mod config;
pub mod error;
pub mod header;
pub mod observer;
pub mod parser;
pub mod validation;

pub use builder::ThreeBBuilder;
pub use chunk::{CHUNK_HEADER_SIZE, ChunkHeader, ChunkRecord, ChunkTag, SKIP_GAP, TAG_SIZE};
pub use config::{ByteOrder, HeaderPolicy, ParserConfig};
pub use error::{Result, ThreeBError};
pub use header::{FileHeader, HEADER_SIZE, HeaderCheck, SANITY_MARKER, THREEB_MAGIC};
pub use observer::{LogObserver, NoopObserver, ParseEvent, ParseObserver};
pub use parser::{ChunkStreamParser, ParseResult, ScanOutcome, VolumeInfo};
pub use validation::validate_parse_result;

/// Parse a complete file with the default settings
pub fn parse(buffer: &[u8]) -> Result<ParseResult> {
    ChunkStreamParser::new().parse(buffer)
}
