use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BLOCK_SIZE, MIN_BLOCK_SIZE};

/// 分帧格式头部（魔数之后的两个版本字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub compatible_version: u32,
    pub version: u32,
}

/// 写入器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// 单个块的未压缩字节数，低于 `MIN_BLOCK_SIZE` 时按下限处理
    pub block_size: usize,
}

impl WriterConfig {
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// 应用下限后的实际块大小
    pub fn effective_block_size(&self) -> usize {
        self.block_size.max(MIN_BLOCK_SIZE)
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}
