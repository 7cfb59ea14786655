use std::io::{BufReader, Read};

use gt3x_types::{Gt3xResult, LogBlock};
use log::{debug, warn};

use crate::{
    binary::{read_full, read_vec},
    format::{BlockHeader, BlockHeaderExt, BLOCK_HEADER_SIZE, BLOCK_TRAILER_SIZE},
};

/// Последовательный читатель блоков `log.bin`.
///
/// Неполный заголовок или неполные данные в конце потока — это штатный
/// конец журнала, а не ошибка. Неверный разделитель прерывает чтение.
pub struct BlockReader<R: Read> {
    reader: BufReader<R>,
    offset: u64,
    stats: ReadStats,
    done: bool,
}

/// Статистика, накопленная [`BlockReader`] в процессе чтения.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadStats {
    /// Успешно прочитанных блоков.
    pub blocks_ok: u64,
    /// Всего обработано байт (включая заголовки и хвостовые байты).
    pub bytes_processed: u64,
    /// Байт усечённого хвоста, отброшенных в конце потока.
    pub truncated_bytes: u64,
}

impl<R: Read> BlockReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            offset: 0,
            stats: ReadStats::default(),
            done: false,
        }
    }

    /// Возвращает следующий блок или `None` на конце потока.
    pub fn next_block(&mut self) -> Option<Gt3xResult<LogBlock>> {
        if self.done {
            return None;
        }

        match self.read_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn read_block(&mut self) -> Gt3xResult<Option<LogBlock>> {
        let mut hdr_buf = [0u8; BLOCK_HEADER_SIZE];
        let got = read_full(&mut self.reader, &mut hdr_buf)?;

        if got == 0 {
            return Ok(None);
        }

        if got < BLOCK_HEADER_SIZE {
            debug!(
                "Truncated header at offset {}: {got} of {BLOCK_HEADER_SIZE} bytes, stopping",
                self.offset
            );
            self.stats.truncated_bytes += got as u64;
            return Ok(None);
        }

        let header = BlockHeader::deserialize(&hdr_buf, self.offset)?;
        let size = header.payload_size as usize;
        let payload = read_vec(&mut self.reader, size)?;

        if payload.len() < size {
            warn!(
                "Truncated payload at offset {}: {} of {size} bytes (type {}), stopping",
                self.offset,
                payload.len(),
                header.type_code
            );
            self.stats.truncated_bytes += (got + payload.len()) as u64;
            return Ok(None);
        }

        // Хвостовой байт отбрасывается без проверки; его отсутствие в самом
        // конце потока блок не портит
        let mut trailer = [0u8; BLOCK_TRAILER_SIZE];
        let trailer_len = read_full(&mut self.reader, &mut trailer)?;

        let consumed = (BLOCK_HEADER_SIZE + size + trailer_len) as u64;
        self.offset += consumed;
        self.stats.bytes_processed += consumed;
        self.stats.blocks_ok += 1;

        Ok(Some(LogBlock::new(
            header.type_code,
            header.timestamp,
            payload,
        )))
    }

    /// Накопленная статистика чтения.
    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Gt3xResult<LogBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block()
    }
}

/// Convenience: читает все блоки, собирая их в вектор.
///
/// Первая ошибка формата прерывает чтение.
pub fn read_all_blocks<R: Read>(reader: &mut BlockReader<R>) -> Gt3xResult<Vec<LogBlock>> {
    let mut blocks = Vec::new();
    while let Some(result) = reader.next_block() {
        blocks.push(result?);
    }

    debug!(
        "Read {} blocks, {} bytes ({} bytes of truncated tail)",
        reader.stats().blocks_ok,
        reader.stats().bytes_processed,
        reader.stats().truncated_bytes,
    );

    Ok(blocks)
}

/// Разбирает поток блоков, целиком находящийся в памяти.
pub fn decode_blocks(bytes: &[u8]) -> Gt3xResult<Vec<LogBlock>> {
    read_all_blocks(&mut BlockReader::new(bytes))
}

#[cfg(test)]
pub(crate) mod tests {
    use gt3x_types::Gt3xError;

    use super::*;

    /// Собирает один блок: заголовок, данные, хвостовой байт.
    pub(crate) fn encode_block(
        type_code: u8,
        timestamp: u32,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(payload.len() + 9);
        buf.push(30);
        buf.push(type_code);
        buf.extend_from_slice(&timestamp.to_le_bytes());
        buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        buf.extend_from_slice(payload);
        buf.push(0);
        buf
    }

    #[test]
    fn test_reader_iterates_blocks() {
        let mut raw = Vec::new();
        raw.extend(encode_block(0, 100, &[1, 2, 3]));
        raw.extend(encode_block(5, 101, &[4, 5]));
        raw.extend(encode_block(0, 102, &[6, 7, 8]));

        let mut reader = BlockReader::new(raw.as_slice());
        let blocks: Vec<LogBlock> = reader.by_ref().collect::<Gt3xResult<_>>().unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], LogBlock::new(0, 100, vec![1, 2, 3]));
        assert_eq!(blocks[1], LogBlock::new(5, 101, vec![4, 5]));
        assert_eq!(blocks[2], LogBlock::new(0, 102, vec![6, 7, 8]));

        let stats = reader.stats();
        assert_eq!(stats.blocks_ok, 3);
        assert_eq!(stats.bytes_processed, raw.len() as u64);
        assert_eq!(stats.truncated_bytes, 0);
    }

    #[test]
    fn test_empty_stream() {
        assert!(decode_blocks(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let raw = encode_block(3, 7, &[]);
        let blocks = decode_blocks(&raw).unwrap();

        assert_eq!(blocks, vec![LogBlock::new(3, 7, vec![])]);
    }

    #[test]
    fn test_truncated_header_is_end_of_stream() {
        let mut raw = encode_block(0, 1, &[1, 2, 3]);
        raw.extend_from_slice(&[30, 0, 0, 0, 0]);

        let mut reader = BlockReader::new(raw.as_slice());
        let blocks = read_all_blocks(&mut reader).unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(reader.stats().truncated_bytes, 5);
    }

    #[test]
    fn test_truncated_header_with_bad_separator_is_end_of_stream() {
        // Неполный заголовок не разбирается, поэтому разделитель не проверяется
        let mut raw = encode_block(0, 1, &[1, 2, 3]);
        raw.extend_from_slice(&[0xFF, 0xFF]);

        assert_eq!(decode_blocks(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_truncated_payload_is_end_of_stream() {
        let mut raw = encode_block(0, 1, &[1, 2, 3]);
        let second = encode_block(0, 2, &[4, 5, 6, 7]);
        raw.extend_from_slice(&second[..10]);

        let mut reader = BlockReader::new(raw.as_slice());
        let blocks = read_all_blocks(&mut reader).unwrap();

        assert_eq!(blocks, vec![LogBlock::new(0, 1, vec![1, 2, 3])]);
        assert_eq!(reader.stats().truncated_bytes, 10);
    }

    #[test]
    fn test_missing_final_trailer_keeps_block() {
        let mut raw = encode_block(2, 9, &[0xAA, 0xBB]);
        raw.pop();

        let blocks = decode_blocks(&raw).unwrap();
        assert_eq!(blocks, vec![LogBlock::new(2, 9, vec![0xAA, 0xBB])]);
    }

    #[test]
    fn test_trailer_byte_is_not_validated() {
        let mut raw = encode_block(0, 1, &[1]);
        *raw.last_mut().unwrap() = 0xEE;
        raw.extend(encode_block(0, 2, &[2]));

        assert_eq!(decode_blocks(&raw).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_separator_aborts() {
        let mut raw = encode_block(0, 1, &[1, 2, 3]);
        let mut bad = encode_block(0, 2, &[4]);
        bad[0] = 0x1F;
        raw.extend(bad);
        raw.extend(encode_block(0, 3, &[5]));

        let mut reader = BlockReader::new(raw.as_slice());

        assert!(reader.next_block().unwrap().is_ok());
        match reader.next_block() {
            Some(Err(Gt3xError::InvalidSeparator { found, offset })) => {
                assert_eq!(found, 0x1F);
                assert_eq!(offset, 12);
            }
            other => panic!("expected InvalidSeparator, got {other:?}"),
        }
        // После ошибки поток больше не читается
        assert!(reader.next_block().is_none());
    }

    #[test]
    fn test_read_all_blocks_propagates_error() {
        let raw = [0u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = decode_blocks(&raw).unwrap_err();

        assert!(err.is_format_error());
    }
}
