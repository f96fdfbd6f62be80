//! Integration tests for the 3b chunk stream parser

use pretty_assertions::assert_eq;
use test_case::test_case;

use vol_3b::{
    ByteOrder, ChunkRecord, ChunkStreamParser, ChunkTag, ParseEvent, ParseResult, ParserConfig,
    SKIP_GAP, THREEB_MAGIC, ThreeBBuilder, ThreeBError, VolumeInfo, validate_parse_result,
};

/// Creates a file with a few unknown chunks in front of the volume chunk
fn create_test_file() -> Vec<u8> {
    ThreeBBuilder::new()
        .chunk(*b"DESC", b"CT head scan".to_vec())
        .chunk(*b"META", vec![0x11; 32])
        .chunk(*b"EMPT", Vec::new())
        .volume(3, vec![0x7F; 64])
        .build()
        .expect("Failed to build test file")
}

#[test_case(0 ; "empty buffer")]
#[test_case(1 ; "one byte")]
#[test_case(4 ; "magic only")]
#[test_case(7 ; "one byte short")]
fn test_short_buffer_is_truncated(len: usize) {
    let data = create_test_file();

    let mut chunks = 0;
    let mut observer = |event: &ParseEvent<'_>| {
        if matches!(event, ParseEvent::Chunk(_)) {
            chunks += 1;
        }
    };
    let err = ChunkStreamParser::new()
        .parse_with_observer(&data[..len], &mut observer)
        .unwrap_err();

    assert!(matches!(err, ThreeBError::TruncatedInput { offset: 0, .. }));
    assert_eq!(chunks, 0);
}

#[test]
fn test_header_then_volume() {
    let data = ThreeBBuilder::new().volume(42, Vec::new()).build().unwrap();

    let result = vol_3b::parse(&data).unwrap();
    assert_eq!(
        result,
        ParseResult {
            header_magic_ok: true,
            header_sanity_ok: true,
            chunks: vec![ChunkRecord {
                tag: ChunkTag::VOL3,
                declared_size: 4,
                offset: 8,
            }],
            volume: Some(VolumeInfo {
                offset: 8,
                declared_size: 4,
                version: 42,
            }),
        }
    );
}

#[test]
fn test_unknown_chunk_skip_arithmetic() {
    const S: usize = 37;

    let mut data = Vec::new();
    data.extend_from_slice(&THREEB_MAGIC);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(b"JUNK");
    data.extend_from_slice(&(S as u32).to_le_bytes());
    data.extend_from_slice(&[0xEE; S]);
    data.extend_from_slice(&[0xEE; SKIP_GAP]);
    let volume_offset = data.len();
    data.extend_from_slice(b"VOL3");
    data.extend_from_slice(&4u32.to_le_bytes());
    data.extend_from_slice(&9u32.to_le_bytes());

    let result = vol_3b::parse(&data).unwrap();

    // 8 header bytes + payload + gap from the start of the JUNK chunk
    assert_eq!(volume_offset - 8, 8 + S + SKIP_GAP);
    assert_eq!(result.chunks[1].offset, volume_offset);
    assert_eq!(result.volume_version(), Some(9));
}

#[test]
fn test_ends_at_tag_boundary() {
    let mut data = ThreeBBuilder::new()
        .chunk(*b"META", vec![1, 2, 3, 4])
        .build()
        .unwrap();
    data.extend_from_slice(b"VOL3");

    let err = vol_3b::parse(&data).unwrap_err();
    match err {
        ThreeBError::TruncatedInput {
            offset,
            needed,
            available,
        } => {
            assert_eq!(offset, data.len() - 4);
            assert_eq!(needed, 8);
            assert_eq!(available, 4);
        }
        other => panic!("Expected TruncatedInput, got {other}"),
    }
}

#[test]
fn test_volume_without_version() {
    let mut data = ThreeBBuilder::new().build().unwrap();
    data.extend_from_slice(b"VOL3");
    data.extend_from_slice(&4u32.to_le_bytes());
    data.extend_from_slice(&[0, 0]);

    let err = vol_3b::parse(&data).unwrap_err();
    assert!(matches!(
        err,
        ThreeBError::TruncatedInput {
            offset: 16,
            needed: 4,
            available: 2
        }
    ));
}

#[test]
fn test_parse_is_idempotent() {
    let data = create_test_file();
    let parser = ChunkStreamParser::new();

    let first = parser.parse(&data).unwrap();
    let second = parser.parse(&data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_byte_range_reproduces_chunk() {
    let data = create_test_file();
    let result = vol_3b::parse(&data).unwrap();

    let meta = result
        .chunks_with_tag(ChunkTag::from_bytes(*b"META"))
        .next()
        .expect("META chunk");
    let slice = &data[meta.byte_range()];

    let mut expected = Vec::new();
    expected.extend_from_slice(b"META");
    expected.extend_from_slice(&32u32.to_le_bytes());
    expected.extend_from_slice(&[0x11; 32]);
    assert_eq!(slice, expected.as_slice());
}

#[test]
fn test_stops_at_first_volume() {
    let data = ThreeBBuilder::new()
        .volume(1, vec![0; 4])
        .volume(2, vec![0; 4])
        .build()
        .unwrap();

    let result = vol_3b::parse(&data).unwrap();
    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.volume_version(), Some(1));
}

#[test]
fn test_no_volume_is_not_an_error() {
    let data = ThreeBBuilder::new()
        .chunk(*b"AAAA", vec![1])
        .chunk(*b"BBBB", vec![2, 2])
        .build()
        .unwrap();

    let result = vol_3b::parse(&data).unwrap();
    assert_eq!(result.chunks.len(), 2);
    assert_eq!(result.volume, None);
    assert_eq!(result.unknown_chunks().count(), 2);
    assert!(validate_parse_result(&result).is_err());
}

#[test]
fn test_realistic_file_validates() {
    let data = create_test_file();
    let result = vol_3b::parse(&data).unwrap();

    let tags: Vec<String> = result.chunks.iter().map(|c| c.tag.to_string()).collect();
    assert_eq!(tags, vec!["DESC", "META", "EMPT", "VOL3"]);
    assert_eq!(result.volume_version(), Some(3));
    assert_eq!(result.volume.map(|v| v.declared_size), Some(4 + 64));
    validate_parse_result(&result).unwrap();
}

#[test_case(ByteOrder::Little ; "little endian")]
#[test_case(ByteOrder::Big ; "big endian")]
#[test_case(ByteOrder::Native ; "native")]
fn test_byte_orders(byte_order: ByteOrder) {
    let data = ThreeBBuilder::new()
        .with_byte_order(byte_order)
        .chunk(*b"META", vec![0; 300])
        .volume(0x0102_0304, Vec::new())
        .build()
        .unwrap();

    let parser =
        ChunkStreamParser::with_config(ParserConfig::default().with_byte_order(byte_order));
    let result = parser.parse(&data).unwrap();
    assert!(result.header_ok());
    assert_eq!(result.chunks[0].declared_size, 300);
    assert_eq!(result.volume_version(), Some(0x0102_0304));
}

#[test]
fn test_custom_magic() {
    let data = ThreeBBuilder::new()
        .magic(*b"3BF0")
        .volume(1, Vec::new())
        .build()
        .unwrap();

    assert!(!vol_3b::parse(&data).unwrap().header_magic_ok);

    let parser = ChunkStreamParser::with_config(ParserConfig::default().with_magic(*b"3BF0").strict());
    assert!(parser.parse(&data).unwrap().header_magic_ok);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_export() {
    let data = create_test_file();
    let json = vol_3b::parse(&data).unwrap().to_json().unwrap();
    assert!(json.contains("\"header_magic_ok\": true"));
    assert!(json.contains("\"version\": 3"));
}
