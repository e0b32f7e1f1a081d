use crate::error::CodecError;

/// 合法的 snappy 数据中，每个压缩字节最多展开为约21个字节（3字节复制标签对应64字节）
const MAX_EXPANSION: usize = 24;

/// 单块压缩算法
///
/// 分帧层只负责调度，每个块的实际编码交给实现者完成。
pub trait BlockCodec {
    /// `len` 字节输入在最坏情况下的压缩长度
    fn max_compressed_len(&self, len: usize) -> usize;

    /// 将 `src` 压缩进 `dst`，返回写入的字节数
    ///
    /// 调用方保证 `dst.len() >= self.max_compressed_len(src.len())`。
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError>;

    /// 将 `src` 解压到 `scratch` 中并交还
    ///
    /// `scratch` 原有内容会被丢弃，其容量可在多次调用间复用。
    fn decompress(&mut self, src: &[u8], scratch: Vec<u8>) -> Result<Vec<u8>, CodecError>;
}

/// snappy 原始格式（无分帧）
pub struct Snappy {
    encoder: snap::raw::Encoder,
    decoder: snap::raw::Decoder,
}

impl Snappy {
    pub fn new() -> Self {
        Self {
            encoder: snap::raw::Encoder::new(),
            decoder: snap::raw::Decoder::new(),
        }
    }
}

impl Default for Snappy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Snappy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Snappy")
    }
}

impl BlockCodec for Snappy {
    fn max_compressed_len(&self, len: usize) -> usize {
        snap::raw::max_compress_len(len)
    }

    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
        Ok(self.encoder.compress(src, dst)?)
    }

    fn decompress(&mut self, src: &[u8], mut scratch: Vec<u8>) -> Result<Vec<u8>, CodecError> {
        let len = snap::raw::decompress_len(src)?;
        if len > src.len().saturating_mul(MAX_EXPANSION) {
            return Err(CodecError::Other(format!(
                "声明的解压长度 {} 与 {} 字节输入不符",
                len,
                src.len()
            )));
        }
        scratch.clear();
        scratch.resize(len, 0);
        let written = self.decoder.decompress(src, &mut scratch)?;
        scratch.truncate(written);
        Ok(scratch)
    }
}

/// 无分帧 snappy 压缩
pub fn compress_data(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    Ok(snap::raw::Encoder::new().compress_vec(data)?)
}

/// 无分帧 snappy 解压
pub fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>, CodecError> {
    Snappy::new().decompress(compressed_data, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snappy_compress_into_slice() {
        let mut codec = Snappy::new();
        let input = b"abcabcabcabcabcabcabcabcabcabc".repeat(10);
        let mut dst = vec![0u8; codec.max_compressed_len(input.len())];

        let n = codec.compress(&input, &mut dst).unwrap();
        assert!(n > 0 && n < input.len());

        let out = codec.decompress(&dst[..n], Vec::new()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn scratch_is_reused_and_replaced() {
        let mut codec = Snappy::new();
        let big = compress_data(&[7u8; 4096]).unwrap();
        let small = compress_data(b"xy").unwrap();

        let scratch = codec.decompress(&big, Vec::new()).unwrap();
        let capacity = scratch.capacity();
        let scratch = codec.decompress(&small, scratch).unwrap();

        assert_eq!(scratch, b"xy");
        assert!(scratch.capacity() >= capacity);
    }

    #[test]
    fn empty_input_compresses_to_nonempty_payload() {
        let compressed = compress_data(&[]).unwrap();
        assert!(!compressed.is_empty());
        assert!(decompress_data(&compressed).unwrap().is_empty());
    }

    #[test]
    fn implausible_length_header_is_rejected_before_allocation() {
        // 声明约4GB的解压长度，实际只有几个字节
        let src = [0xff, 0xff, 0xff, 0xff, 0x0e, 0x00];
        assert!(matches!(
            Snappy::new().decompress(&src, Vec::new()),
            Err(CodecError::Other(_))
        ));
    }

    #[test]
    fn highly_compressible_block_is_accepted() {
        let input = vec![0u8; 64 * 1024];
        let compressed = compress_data(&input).unwrap();
        assert_eq!(decompress_data(&compressed).unwrap(), input);
    }

    #[test]
    fn corrupt_payload_is_rejected() {
        assert!(matches!(
            decompress_data(&[0xff, 0xff, 0xff]),
            Err(CodecError::Snappy(_))
        ));
    }
}
