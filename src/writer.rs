use crate::{
    buffer::BlockBuffer,
    chunk::{write_chunk_prefix, CHUNK_PREFIX_LEN},
    codec::{BlockCodec, Snappy},
    error::{CodecError, FramingError},
    header::header_bytes,
    types::WriterConfig,
    HEADER_LEN,
};
use std::io::{self, Write};
use tracing::{debug, warn};

/// 分帧格式的流式写入器
///
/// 输入先累积到固定大小的输入缓冲区，每满一块压缩一次，带长度前缀写入输出缓冲区；
/// 输出缓冲区放不下下一个最坏情况的区块时才写入下游。内存占用只与块大小有关。
///
/// 调用 `flush` 才会把不足一块的尾部数据和输出缓冲区写出，丢弃前务必调用。
pub struct FramedWriter<W: Write, C: BlockCodec = Snappy> {
    inner: W,
    codec: C,
    block_size: usize,
    input: BlockBuffer,
    output: BlockBuffer,
}

impl<W: Write> FramedWriter<W> {
    /// 使用默认块大小创建写入器
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, WriterConfig::default())
    }

    /// 使用指定块大小创建写入器，小于下限时按下限处理
    pub fn with_block_size(inner: W, block_size: usize) -> Self {
        Self::with_config(inner, WriterConfig::new(block_size))
    }

    pub fn with_config(inner: W, config: WriterConfig) -> Self {
        Self::with_codec(inner, Snappy::new(), config)
    }
}

impl<W: Write, C: BlockCodec> FramedWriter<W, C> {
    /// 使用自定义编解码器创建写入器
    pub fn with_codec(inner: W, codec: C, config: WriterConfig) -> Self {
        let block_size = config.effective_block_size();
        if block_size != config.block_size {
            warn!(
                requested = config.block_size,
                block_size, "block size below minimum, clamped"
            );
        }

        let output_capacity = HEADER_LEN + CHUNK_PREFIX_LEN + codec.max_compressed_len(block_size);
        let mut output = BlockBuffer::with_capacity(output_capacity);
        output.write(&header_bytes());

        Self {
            inner,
            codec,
            block_size,
            input: BlockBuffer::with_capacity(block_size),
            output,
        }
    }

    /// 实际使用的块大小
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// 直接写入下游会破坏分帧结构
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// 刷新所有缓冲数据后取回下游写入器
    ///
    /// 刷新失败时返回错误和写入器本身，缓冲数据不会丢失。
    pub fn into_inner(mut self) -> Result<W, (FramingError, Self)> {
        match self.flush_all() {
            Ok(()) => Ok(self.inner),
            Err(e) => Err((e, self)),
        }
    }

    /// 接收数据，返回本次接收的字节数和遇到的第一个错误
    ///
    /// 出错前接收的字节已在缓冲区中，不会回滚。
    pub(crate) fn write_data(&mut self, mut data: &[u8]) -> (usize, Result<(), FramingError>) {
        let mut accepted = 0;
        while !data.is_empty() {
            let num = self.input.write(data);
            if num == 0 {
                if let Err(e) = self.compress_input() {
                    return (accepted, Err(e));
                }
                continue;
            }
            data = &data[num..];
            accepted += num;
        }
        (accepted, Ok(()))
    }

    /// 压缩剩余输入并将输出缓冲区写入下游
    fn flush_all(&mut self) -> Result<(), FramingError> {
        self.compress_input()?;
        self.dump_output()
    }

    /// 将输入缓冲区中的数据压缩成一个区块
    ///
    /// 输出空间不足时先写出输出缓冲区。压缩成功后才清空输入缓冲区，
    /// 下游写入或压缩失败时待压缩的块保持不变。
    fn compress_input(&mut self) -> Result<(), FramingError> {
        if self.input.is_empty() {
            return Ok(());
        }

        if !self.has_sufficient_output_for(self.input.len()) {
            self.dump_output()?;
        }

        let block = self.input.as_slice();
        let spare = self.output.spare_mut();
        let (prefix, payload) = spare.split_at_mut(CHUNK_PREFIX_LEN);
        let encoded_len = self.codec.compress(block, payload)?;
        let prefix_len = u32::try_from(encoded_len).map_err(|_| {
            CodecError::Other(format!("区块压缩后长度 {} 超出u32范围", encoded_len))
        })?;
        write_chunk_prefix(prefix, prefix_len);
        self.output.advance(CHUNK_PREFIX_LEN + encoded_len);

        debug!(
            raw = block.len(),
            compressed = encoded_len,
            "compressed block"
        );
        self.input.clear();
        Ok(())
    }

    fn has_sufficient_output_for(&self, input_len: usize) -> bool {
        CHUNK_PREFIX_LEN + self.codec.max_compressed_len(input_len) <= self.output.remaining()
    }

    /// 将输出缓冲区写入下游，成功后才清空
    fn dump_output(&mut self) -> Result<(), FramingError> {
        if self.output.is_empty() {
            return Ok(());
        }

        self.inner.write_all(self.output.as_slice())?;
        debug!(bytes = self.output.len(), "flushed output buffer");
        self.output.clear();
        Ok(())
    }
}

impl<W: Write, C: BlockCodec> Write for FramedWriter<W, C> {
    /// 已接收部分数据时返回接收的字节数，错误留到下一次调用再报告
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_data(buf) {
            (accepted, Ok(())) => Ok(accepted),
            (0, Err(e)) => Err(e.into()),
            (accepted, Err(e)) => {
                debug!(accepted, error = %e, "partial write");
                Ok(accepted)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_all()?;
        self.inner.flush()
    }
}

impl<W: Write + std::fmt::Debug, C: BlockCodec> std::fmt::Debug for FramedWriter<W, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramedWriter")
            .field("inner", &self.inner)
            .field("block_size", &self.block_size)
            .field("buffered_input", &self.input.len())
            .field("buffered_output", &self.output.len())
            .finish()
    }
}
