use std::io;

/// 固定容量的字节缓冲区
///
/// 写满后不会扩容，只能通过 `drain` 或 `clear` 复位后继续使用。
#[derive(Debug)]
pub struct BlockBuffer {
    block: Vec<u8>,
    cursor: usize,
}

impl BlockBuffer {
    /// 创建指定容量的缓冲区
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            block: vec![0u8; capacity],
            cursor: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// 已写入的字节数
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor == self.block.len()
    }

    /// 剩余可写入的字节数
    #[inline]
    pub fn remaining(&self) -> usize {
        self.block.len() - self.cursor
    }

    /// 尽可能多地拷贝数据，返回实际拷贝的字节数（写满时为0）
    pub fn write(&mut self, data: &[u8]) -> usize {
        let size = data.len().min(self.remaining());
        self.block[self.cursor..self.cursor + size].copy_from_slice(&data[..size]);
        self.cursor += size;
        size
    }

    /// 取出已累积的数据并将游标归零
    ///
    /// 返回的切片在下一次写入前有效。
    pub fn drain(&mut self) -> &[u8] {
        let len = self.cursor;
        self.cursor = 0;
        &self.block[..len]
    }

    /// 已累积数据的只读视图，不改变游标
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.block[..self.cursor]
    }

    /// 空闲区域，配合 `advance` 原地写入
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.block[self.cursor..]
    }

    /// 提交已写入空闲区域的 `n` 个字节
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.cursor = (self.cursor + n).min(self.block.len());
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cursor = 0;
    }
}

impl io::Write for BlockBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(BlockBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
