//! Property-based tests for the chunk walk

use proptest::prelude::*;
use vol_3b::{ChunkStreamParser, ChunkTag, SKIP_GAP, ThreeBBuilder};

fn unknown_tag() -> impl Strategy<Value = [u8; 4]> {
    any::<[u8; 4]>().prop_filter("must not be the volume tag", |t| t != b"VOL3")
}

proptest! {
    #[test]
    fn parse_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let parser = ChunkStreamParser::new();
        let _ = parser.parse(&data);
        let outcome = parser.scan(&data);
        prop_assert!(outcome.result.chunks.iter().all(|c| c.offset + 8 <= data.len()));
    }

    #[test]
    fn parse_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let parser = ChunkStreamParser::new();
        let first = parser.scan(&data);
        let second = parser.scan(&data);
        prop_assert_eq!(first.result, second.result);
        prop_assert_eq!(first.error.map(|e| e.to_string()), second.error.map(|e| e.to_string()));
    }

    #[test]
    fn built_files_roundtrip(
        chunks in proptest::collection::vec(
            (unknown_tag(), proptest::collection::vec(any::<u8>(), 0..64)),
            0..8,
        ),
        version in any::<u32>(),
    ) {
        let mut builder = ThreeBBuilder::new();
        for (tag, payload) in &chunks {
            builder = builder.chunk(*tag, payload.clone());
        }
        let data = builder.volume(version, Vec::new()).build().unwrap();

        let result = vol_3b::parse(&data).unwrap();
        prop_assert!(result.header_ok());
        prop_assert_eq!(result.chunks.len(), chunks.len() + 1);
        prop_assert_eq!(result.volume_version(), Some(version));

        let mut expected_offset = 8;
        for (record, (tag, payload)) in result.chunks.iter().zip(&chunks) {
            prop_assert_eq!(record.tag, ChunkTag::from_bytes(*tag));
            prop_assert_eq!(record.offset, expected_offset);
            prop_assert_eq!(&data[record.payload_range()], payload.as_slice());
            expected_offset += 8 + payload.len() + SKIP_GAP;
        }
    }
}
