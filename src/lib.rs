//! snappy 的 xerial 分帧格式
//!
//! 分帧数据由16字节头部（魔数 + 两个大端版本号）和若干区块组成，
//! 每个区块是4字节大端长度前缀加上一段 snappy 压缩数据，没有结束标记。
//!
//! ```
//! use snappy_xerial::{decode, encode_framed};
//!
//! let framed = encode_framed(b"hello hello hello").unwrap();
//! assert_eq!(decode(&framed).unwrap(), b"hello hello hello");
//! ```

pub mod buffer;
pub mod chunk;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod header;
pub mod types;
pub mod writer;

pub use crate::buffer::BlockBuffer;
pub use crate::codec::{BlockCodec, Snappy};
pub use crate::decoder::{decode, FramedDecoder};
pub use crate::error::{CodecError, FramingError};
pub use crate::types::{FrameHeader, WriterConfig};
pub use crate::writer::FramedWriter;

/// 分帧魔数
pub const MAGIC: &[u8; 8] = b"\x82SNAPPY\x00";

pub const MAGIC_LEN: usize = 8;

/// 头部总长度：魔数 + 兼容版本 + 版本
pub const HEADER_LEN: usize = 16;

pub const COMPATIBLE_VERSION: u32 = 1;

pub const VERSION: u32 = 1;

/// 块大小下限
pub const MIN_BLOCK_SIZE: usize = 1024;

pub const DEFAULT_BLOCK_SIZE: usize = 32 * 1024;

/// 无分帧 snappy 压缩
pub fn encode(src: &[u8]) -> Result<Vec<u8>, FramingError> {
    Ok(codec::compress_data(src)?)
}

/// 使用默认块大小压缩为分帧格式
pub fn encode_framed(src: &[u8]) -> Result<Vec<u8>, FramingError> {
    encode_framed_with_block_size(src, DEFAULT_BLOCK_SIZE)
}

/// 使用指定块大小压缩为分帧格式
pub fn encode_framed_with_block_size(src: &[u8], block_size: usize) -> Result<Vec<u8>, FramingError> {
    let mut writer = FramedWriter::with_block_size(Vec::new(), block_size);
    writer.write_data(src).1?;
    writer.into_inner().map_err(|(e, _)| e)
}
