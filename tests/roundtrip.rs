//! 往返性质测试
//!
//! 覆盖无分帧与分帧两种格式，输入跨越零个、一个和多个块。

use proptest::prelude::*;
use std::io::Write;

use snappy_xerial::{
    chunk::ChunkReader, decode, encode, encode_framed_with_block_size, header::header_bytes,
    FramedWriter, HEADER_LEN, MIN_BLOCK_SIZE,
};

fn block_size_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0usize),
        Just(MIN_BLOCK_SIZE),
        Just(1500),
        Just(4096),
        Just(32 * 1024),
    ]
}

/// 既有可压缩的重复片段，也有随机字节
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..10_000),
        (prop::collection::vec(any::<u8>(), 1..64), 0usize..400)
            .prop_map(|(pattern, times)| pattern.repeat(times)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_unframed_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let encoded = encode(&data).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn prop_framed_roundtrip(data in payload_strategy(), block_size in block_size_strategy()) {
        let framed = encode_framed_with_block_size(&data, block_size).unwrap();
        prop_assert_eq!(decode(&framed).unwrap(), data);
    }

    #[test]
    fn prop_fixed_header(data in payload_strategy(), block_size in block_size_strategy()) {
        let framed = encode_framed_with_block_size(&data, block_size).unwrap();
        let header = header_bytes();
        prop_assert_eq!(&framed[..HEADER_LEN], &header[..]);
    }

    #[test]
    fn prop_chunk_lengths_cover_stream(data in payload_strategy(), block_size in block_size_strategy()) {
        let framed = encode_framed_with_block_size(&data, block_size).unwrap();
        let effective = block_size.max(MIN_BLOCK_SIZE);

        let mut consumed = HEADER_LEN;
        let mut chunks = 0;
        for chunk in ChunkReader::new(&framed) {
            let chunk = chunk.unwrap();
            prop_assert_eq!(chunk.offset, consumed);
            let decoded = snap::raw::Decoder::new().decompress_vec(chunk.payload).unwrap();
            prop_assert!(decoded.len() <= effective);
            consumed += 4 + chunk.payload.len();
            chunks += 1;
        }

        prop_assert_eq!(consumed, framed.len());
        prop_assert_eq!(chunks, (data.len() + effective - 1) / effective);
    }

    #[test]
    fn prop_split_writes_match_single_write(
        data in payload_strategy(),
        split in prop::collection::vec(1usize..3000, 1..8),
    ) {
        let whole = encode_framed_with_block_size(&data, MIN_BLOCK_SIZE).unwrap();

        let mut writer = FramedWriter::with_block_size(Vec::new(), MIN_BLOCK_SIZE);
        let mut rest = &data[..];
        for size in split.iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let n = (*size).min(rest.len());
            writer.write_all(&rest[..n]).unwrap();
            rest = &rest[n..];
        }
        writer.flush().unwrap();

        prop_assert_eq!(writer.get_ref(), &whole);
    }

    /// 任意输入都不会导致 panic，结果要么是数据要么是错误
    #[test]
    fn prop_arbitrary_input_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&data);
    }

    #[test]
    fn prop_arbitrary_chunks_never_panic(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut src = header_bytes().to_vec();
        src.extend_from_slice(&body);
        let _ = decode(&src);
    }
}
