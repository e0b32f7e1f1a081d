use crate::{
    error::FramingError, types::FrameHeader, COMPATIBLE_VERSION, HEADER_LEN, MAGIC, MAGIC_LEN,
    VERSION,
};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::Write;

/// 写入分帧头部
pub fn write_header<W: Write>(writer: &mut W) -> Result<(), FramingError> {
    writer.write_all(MAGIC)?;
    writer.write_u32::<BigEndian>(COMPATIBLE_VERSION)?;
    writer.write_u32::<BigEndian>(VERSION)?;
    Ok(())
}

/// 当前版本的16字节头部
pub fn header_bytes() -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[..MAGIC_LEN].copy_from_slice(MAGIC);
    header[8..12].copy_from_slice(&COMPATIBLE_VERSION.to_be_bytes());
    header[12..].copy_from_slice(&VERSION.to_be_bytes());
    header
}

/// 输入是否以分帧魔数开头
///
/// 不足8字节的输入一律返回 false。
pub fn has_magic(src: &[u8]) -> bool {
    src.len() >= MAGIC_LEN && src[..MAGIC_LEN] == *MAGIC
}

/// 输入是否可能是被截断的魔数（含空输入）
pub fn is_magic_prefix(src: &[u8]) -> bool {
    src.len() < MAGIC_LEN && MAGIC.starts_with(src)
}

/// 读取分帧头部
///
/// 调用前应先确认魔数匹配；版本字段只解析不校验。
pub fn read_header(src: &[u8]) -> Result<FrameHeader, FramingError> {
    if src.len() < HEADER_LEN {
        return Err(FramingError::MalformedHeader { len: src.len() });
    }

    Ok(FrameHeader {
        compatible_version: BigEndian::read_u32(&src[MAGIC_LEN..MAGIC_LEN + 4]),
        version: BigEndian::read_u32(&src[MAGIC_LEN + 4..HEADER_LEN]),
    })
}
