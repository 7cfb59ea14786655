use thiserror::Error;

/// Результат для операций GT3X
pub type Gt3xResult<T> = std::result::Result<T, Gt3xError>;

/// Типы ошибок декодирования GT3X.
#[derive(Debug, Error)]
pub enum Gt3xError {
    /// Байт-разделитель блока не равен 30
    #[error("Invalid block separator at offset {offset}: found {found}, expected 30")]
    InvalidSeparator { found: u8, offset: u64 },

    /// Код типа блока вне таблицы каналов (0..=26)
    #[error("Unknown block type code: {0}")]
    UnknownTypeCode(u8),

    /// Запрошенный канал отсутствует в журнале
    #[error("Channel '{name}' not found, available channels: {available:?}")]
    ChannelNotFound {
        name: String,
        available: Vec<String>,
    },

    /// Значение метаданных присутствует, но не разбирается
    #[error("Metadata field '{key}' has invalid value {value:?}: {reason}")]
    Metadata {
        key: String,
        value: String,
        reason: String,
    },

    /// В архиве нет обязательного файла (info.txt / log.bin)
    #[error("Archive member not found: {0}")]
    MissingMember(String),

    /// Ошибка чтения zip-контейнера
    #[error("Archive error: {0}")]
    Archive(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Gt3xError {
    /// Удобные конструкторы
    pub fn archive<S: Into<String>>(s: S) -> Self {
        Self::Archive(s.into())
    }

    pub fn metadata<K, V, R>(
        key: K,
        value: V,
        reason: R,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        Self::Metadata {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Ошибка структуры бинарного потока (прерывает всё декодирование).
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidSeparator { .. } | Self::UnknownTypeCode(_))
    }
}
