/// Байт-разделитель, с которого начинается каждый блок
pub const BLOCK_SEPARATOR: u8 = 30;

/// Размер заголовка блока (8 байт)
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Хвостовой байт после полезной нагрузки (не проверяется)
pub const BLOCK_TRAILER_SIZE: usize = 1;

/// Заголовок блока журнала `log.bin`.
///
/// Раскладка (little-endian):
/// `[separator:1][type:1][timestamp:4][size:2]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Код типа блока (канал)
    pub type_code: u8,
    /// Время блока в единицах часов устройства
    pub timestamp: u32,
    /// Размер полезной нагрузки в байтах
    pub payload_size: u16,
}

/// Один блок журнала: код типа, время и полезная нагрузка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBlock {
    pub type_code: u8,
    pub timestamp: u32,
    pub payload: Vec<u8>,
}

impl BlockHeader {
    /// Полный размер блока на диске: заголовок + данные + хвостовой байт.
    pub fn block_len(&self) -> usize {
        BLOCK_HEADER_SIZE + self.payload_size as usize + BLOCK_TRAILER_SIZE
    }
}

impl LogBlock {
    pub fn new(
        type_code: u8,
        timestamp: u32,
        payload: Vec<u8>,
    ) -> Self {
        LogBlock {
            type_code,
            timestamp,
            payload,
        }
    }
}
