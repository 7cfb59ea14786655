use crate::format::{INFO_MEMBER, LOG_MEMBER};

/// Параметры декодирования журнала.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeConfig {
    /// Масштаб акселерометра, если в метаданных нет `Acceleration Scale`.
    /// `None` — канал активности остаётся сырым.
    pub fallback_scale: Option<f64>,
    /// Отбрасывать последний блок активности, если его длина отличается от
    /// длины первого
    pub repair_truncated_tail: bool,
    /// Имя файла метаданных в архиве
    pub metadata_member: String,
    /// Имя файла журнала в архиве
    pub log_member: String,
}

impl DecodeConfig {
    fn new() -> Self {
        Self {
            fallback_scale: None,
            repair_truncated_tail: true,
            metadata_member: INFO_MEMBER.to_string(),
            log_member: LOG_MEMBER.to_string(),
        }
    }

    pub fn with_fallback_scale(
        mut self,
        scale: f64,
    ) -> Self {
        self.fallback_scale = Some(scale);
        self
    }

    pub fn with_repair(
        mut self,
        repair: bool,
    ) -> Self {
        self.repair_truncated_tail = repair;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
