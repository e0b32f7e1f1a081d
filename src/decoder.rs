use crate::{
    chunk::ChunkReader,
    codec::{BlockCodec, Snappy},
    error::FramingError,
    header::{has_magic, is_magic_prefix, read_header},
};
use tracing::{debug, trace};

/// 整体解码器，自动识别分帧格式与无分帧格式
///
/// 解码结果一次性保存在内存中。
#[derive(Debug, Default)]
pub struct FramedDecoder<C: BlockCodec = Snappy> {
    codec: C,
}

impl FramedDecoder {
    pub fn new() -> Self {
        Self::with_codec(Snappy::new())
    }
}

impl<C: BlockCodec> FramedDecoder<C> {
    /// 使用自定义编解码器创建解码器
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// 解码完整输入
    ///
    /// 以魔数开头的输入按分帧格式逐块解压并拼接，其余输入整体交给编解码器。
    /// 任一区块失败即返回错误，不返回部分结果。
    pub fn decode(&mut self, src: &[u8]) -> Result<Vec<u8>, FramingError> {
        if is_magic_prefix(src) {
            return Err(FramingError::MalformedHeader { len: src.len() });
        }

        if !has_magic(src) {
            debug!(len = src.len(), "no framing header, decoding as raw block");
            return Ok(self.codec.decompress(src, Vec::new())?);
        }

        let header = read_header(src)?;
        trace!(
            compatible_version = header.compatible_version,
            version = header.version,
            "framing header"
        );

        let mut dst = Vec::with_capacity(src.len());
        let mut scratch = Vec::new();
        for chunk in ChunkReader::new(src) {
            let chunk = chunk?;
            scratch = self
                .codec
                .decompress(chunk.payload, scratch)
                .map_err(|source| FramingError::ChunkDecode {
                    offset: chunk.offset,
                    source,
                })?;
            trace!(
                offset = chunk.offset,
                compressed = chunk.payload.len(),
                decoded = scratch.len(),
                "decoded chunk"
            );
            dst.extend_from_slice(&scratch);
        }

        Ok(dst)
    }
}

/// 使用 snappy 解码分帧或无分帧数据
pub fn decode(src: &[u8]) -> Result<Vec<u8>, FramingError> {
    FramedDecoder::new().decode(src)
}
