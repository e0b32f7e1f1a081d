use crate::{error::FramingError, HEADER_LEN};
use byteorder::{BigEndian, ByteOrder};

/// 区块长度前缀的字节数
pub const CHUNK_PREFIX_LEN: usize = 4;

/// 写入大端长度前缀
pub fn write_chunk_prefix(dst: &mut [u8], payload_len: u32) {
    BigEndian::write_u32(&mut dst[..CHUNK_PREFIX_LEN], payload_len);
}

/// 分帧数据中的一个区块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// 长度前缀在输入中的偏移
    pub offset: usize,
    pub payload: &'a [u8],
}

/// 按顺序遍历头部之后的所有区块
///
/// 遇到截断的长度前缀或载荷时产出一次错误，之后停止。
#[derive(Debug)]
pub struct ChunkReader<'a> {
    src: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> ChunkReader<'a> {
    /// `src` 为包含头部的完整分帧数据
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: HEADER_LEN.min(src.len()),
            failed: false,
        }
    }

    /// 下一个区块的偏移
    pub fn position(&self) -> usize {
        self.pos
    }

    fn fail(&mut self, needed: usize, available: usize) -> FramingError {
        self.failed = true;
        FramingError::TruncatedChunk {
            offset: self.pos,
            needed,
            available,
        }
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.src.len() {
            return None;
        }

        let offset = self.pos;
        let remaining = self.src.len() - offset;
        if remaining < CHUNK_PREFIX_LEN {
            return Some(Err(self.fail(CHUNK_PREFIX_LEN, remaining)));
        }

        let size = BigEndian::read_u32(&self.src[offset..offset + CHUNK_PREFIX_LEN]) as usize;
        let start = offset + CHUNK_PREFIX_LEN;
        let available = self.src.len() - start;
        if size > available {
            return Some(Err(self.fail(size, available)));
        }

        self.pos = start + size;
        Some(Ok(Chunk {
            offset,
            payload: &self.src[start..start + size],
        }))
    }
}
