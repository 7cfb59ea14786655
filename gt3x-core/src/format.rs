//! Формат файла журнала `log.bin` внутри архива .gt3x
//!
//! Поток состоит из блоков без общего заголовка файла. Каждый блок:
//!
//! | смещение | размер | поле                               |
//! |----------|--------|------------------------------------|
//! | 0        | 1      | разделитель, всегда 30             |
//! | 1        | 1      | код типа (канал, 0..=26)           |
//! | 2        | 4      | время, u32 little-endian           |
//! | 6        | 2      | размер данных, u16 little-endian   |
//! | 8        | size   | данные                             |
//! | 8 + size | 1      | хвостовой байт (не проверяется)    |

use byteorder::{ByteOrder, LittleEndian};
pub use gt3x_types::{BlockHeader, BLOCK_HEADER_SIZE, BLOCK_SEPARATOR, BLOCK_TRAILER_SIZE};
use gt3x_types::{Gt3xError, Gt3xResult};

/// Имя файла метаданных в архиве
pub const INFO_MEMBER: &str = "info.txt";

/// Имя файла журнала в архиве
pub const LOG_MEMBER: &str = "log.bin";

/// Разбор заголовка блока (реализуется для типов из `gt3x-types`).
pub trait BlockHeaderExt: Sized {
    /// Десериализация заголовка из 8 байт. `offset` нужен только для текста
    /// ошибки.
    fn deserialize(
        buf: &[u8; BLOCK_HEADER_SIZE],
        offset: u64,
    ) -> Gt3xResult<Self>;
}

impl BlockHeaderExt for BlockHeader {
    fn deserialize(
        buf: &[u8; BLOCK_HEADER_SIZE],
        offset: u64,
    ) -> Gt3xResult<Self> {
        if buf[0] != BLOCK_SEPARATOR {
            return Err(Gt3xError::InvalidSeparator {
                found: buf[0],
                offset,
            });
        }

        Ok(BlockHeader {
            type_code: buf[1],
            timestamp: LittleEndian::read_u32(&buf[2..6]),
            payload_size: LittleEndian::read_u16(&buf[6..8]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_byte_layout() {
        let buf = [30u8, 5, 0x78, 0x56, 0x34, 0x12, 0x02, 0x01];
        let header = BlockHeader::deserialize(&buf, 0).unwrap();

        assert_eq!(header.type_code, 5, "type code");
        assert_eq!(header.timestamp, 0x1234_5678, "timestamp LE");
        assert_eq!(header.payload_size, 0x0102, "size LE");
        assert_eq!(header.block_len(), 8 + 0x0102 + 1);
    }

    #[test]
    fn test_header_invalid_separator() {
        let buf = [31u8, 0, 0, 0, 0, 0, 0, 0];
        let result = BlockHeader::deserialize(&buf, 42);

        match result {
            Err(Gt3xError::InvalidSeparator { found, offset }) => {
                assert_eq!(found, 31);
                assert_eq!(offset, 42);
            }
            other => panic!("expected InvalidSeparator, got {other:?}"),
        }
    }

    #[test]
    fn test_header_keeps_unknown_type_code() {
        // Проверка кода — задача демультиплексора, а не заголовка
        let buf = [30u8, 200, 0, 0, 0, 0, 0, 0];
        let header = BlockHeader::deserialize(&buf, 0).unwrap();

        assert_eq!(header.type_code, 200);
        assert_eq!(header.payload_size, 0);
    }
}
