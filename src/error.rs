use thiserror::Error;
use std::io;

/// 单块编解码器错误
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("snappy错误: {0}")]
    Snappy(#[from] snap::Error),

    #[error("编解码错误: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum FramingError {
    /// 下游写入器返回的错误，原样传递
    #[error("IO错误: {0}")]
    Sink(#[from] io::Error),

    #[error("无效的分帧头部: 输入仅有 {len} 字节")]
    MalformedHeader { len: usize },

    #[error("区块被截断: 偏移 {offset} 处需要 {needed} 字节，仅剩 {available} 字节")]
    TruncatedChunk {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("区块解压失败 (偏移 {offset}): {source}")]
    ChunkDecode {
        offset: usize,
        #[source]
        source: CodecError,
    },

    #[error("{0}")]
    Codec(#[from] CodecError),
}

impl From<FramingError> for io::Error {
    fn from(err: FramingError) -> Self {
        match err {
            FramingError::Sink(e) => e,
            FramingError::MalformedHeader { .. } | FramingError::TruncatedChunk { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, err)
            }
            other => io::Error::other(other),
        }
    }
}
