use snappy_xerial::{chunk::ChunkReader, FramedDecoder, FramedWriter, FramingError};
use std::io::Write;
use tracing::Level;

fn main() -> Result<(), FramingError> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    // 生成示例数据：重复的日志行
    let mut input = Vec::new();
    for i in 0..2000 {
        input.extend_from_slice(format!("{:05} INFO request served in {}ms\n", i, i % 97).as_bytes());
    }
    println!("原始数据: {} 字节", input.len());

    let mut writer = FramedWriter::with_block_size(Vec::new(), 8 * 1024);
    writer.write_all(&input)?;
    let framed = writer.into_inner().map_err(|(e, _)| e)?;
    println!("分帧数据: {} 字节", framed.len());

    println!("\n区块列表:");
    for chunk in ChunkReader::new(&framed) {
        let chunk = chunk?;
        println!("  偏移 {:>6}: {} 字节", chunk.offset, chunk.payload.len());
    }

    let decoded = FramedDecoder::new().decode(&framed)?;
    println!("\n解码后: {} 字节, 与原始数据一致: {}", decoded.len(), decoded == input);

    Ok(())
}
