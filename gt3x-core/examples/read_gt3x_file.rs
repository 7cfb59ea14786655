//! Пример: чтение .gt3x по шагам
//!
//! Демонстрирует:
//! - извлечение `info.txt` и `log.bin` из архива
//! - последовательное чтение блоков через BlockReader
//! - раскладку по каналам и декодирование выборок

use std::env;

use gt3x_core::{
    parse_metadata, read_all_blocks, BlockReader, ChannelDemultiplexer, DecodeConfig, Gt3xArchive,
    SampleCodec,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = env::args().nth(1).unwrap_or_else(|| "subject.gt3x".to_string());
    let config = DecodeConfig::default();

    // --- Архив: оба файла целиком в памяти ---
    let archive = Gt3xArchive::open(&input_path, &config)?;
    let metadata = parse_metadata(archive.info_text())?;

    println!("✓ Archive opened: {input_path}");
    println!("  Sample Rate   : {:?}", metadata.sample_rate);
    println!("  Scale         : {:?}", metadata.acceleration_scale);
    println!("  Start Date    : {:?}", metadata.start_date);
    println!("  Stop Date     : {:?}", metadata.stop_date);

    // --- Блоки ---
    let mut reader = BlockReader::new(archive.log_bytes());
    let blocks = read_all_blocks(&mut reader)?;

    println!("\n✓ Read complete");
    println!("  Blocks ok        : {}", reader.stats().blocks_ok);
    println!("  Bytes processed  : {}", reader.stats().bytes_processed);
    println!("  Truncated tail   : {} bytes", reader.stats().truncated_bytes);

    // --- Каналы и выборки ---
    let demux = ChannelDemultiplexer::demultiplex(blocks)?;
    let codec = SampleCodec::from_config(&metadata, &config);

    println!("\nChannels:");
    for list in demux.into_channels() {
        let channel = codec.decode(list);
        println!(
            "  {:<16} {:>8} blocks {:>10} samples",
            channel.kind.to_string(),
            channel.timestamps.len(),
            channel.samples.len()
        );
    }

    Ok(())
}
