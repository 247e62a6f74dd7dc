//! Property tests for the zstd page compressor: round-trips at every tested
//! level and the size bound holding for arbitrary chunks.

use pagecodec_codecs::{ZstdCompressor, COMPRESSION_LEVEL};
use pagecodec_core::{BufferPlacement, BufferView, Compressor, CompressorOptions};
use proptest::prelude::*;

fn compressor(level: Option<i32>) -> ZstdCompressor {
    let options = match level {
        Some(level) => CompressorOptions::from([(COMPRESSION_LEVEL.to_string(), level.to_string())]),
        None => CompressorOptions::new(),
    };
    ZstdCompressor::create(&options).expect("integer level")
}

fn level_strategy() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        Just(None),
        Just(Some(1)),
        Just(Some(2)),
        Just(Some(4)),
        Just(Some(8)),
        Just(Some(16)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_restores_chunk(raw in proptest::collection::vec(any::<u8>(), 0..8192), level in level_strategy()) {
        let codec = compressor(level);

        let mut input = BufferView::copy_from_slice(&raw, BufferPlacement::OffHeap);
        let mut compressed = BufferView::allocate_direct(codec.initial_compressed_buffer_length(raw.len()));
        codec.compress(&mut input, &mut compressed).unwrap();
        prop_assert_eq!(input.position(), input.limit());

        compressed.flip();
        let mut restored = BufferView::allocate_direct(raw.len());
        codec.uncompress(&mut compressed, &mut restored).unwrap();
        prop_assert_eq!(compressed.position(), compressed.limit());

        restored.flip();
        prop_assert_eq!(restored.remaining_slice(), &raw[..]);
    }

    #[test]
    fn bound_never_underestimates(raw in proptest::collection::vec(any::<u8>(), 0..16384), level in level_strategy()) {
        let codec = compressor(level);
        let bound = codec.initial_compressed_buffer_length(raw.len());

        let mut input = BufferView::copy_from_slice(&raw, BufferPlacement::OffHeap);
        let mut output = BufferView::allocate_direct(bound);
        codec.compress(&mut input, &mut output).unwrap();
        prop_assert!(output.position() <= bound);
    }
}
