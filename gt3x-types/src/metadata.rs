use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Типизированные метаданные из `info.txt`.
///
/// Каждое поле независимо необязательно: отсутствующий ключ даёт `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Частота дискретизации акселерометра, Гц
    pub sample_rate: Option<i64>,
    /// Нижняя граница диапазона ускорения, g
    pub acceleration_min: Option<f64>,
    /// Верхняя граница диапазона ускорения, g
    pub acceleration_max: Option<f64>,
    /// Делитель для перевода сырых отсчётов в g
    pub acceleration_scale: Option<f64>,
    pub start_date: Option<NaiveDateTime>,
    pub stop_date: Option<NaiveDateTime>,
    pub last_sample_time: Option<NaiveDateTime>,
    pub date_of_birth: Option<NaiveDateTime>,
    pub age: Option<i64>,
    /// Передаётся без преобразования
    pub sex: Option<String>,
    /// Все пары ключ/значение как есть (серийный номер, прошивка и т.д.)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub raw: BTreeMap<String, String>,
}

impl Metadata {
    /// Сырое значение по ключу `info.txt`.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let meta = Metadata::default();

        assert!(meta.sample_rate.is_none());
        assert!(meta.acceleration_scale.is_none());
        assert!(meta.sex.is_none());
        assert!(meta.get("Serial Number").is_none());
    }

    #[test]
    fn test_raw_lookup() {
        let mut meta = Metadata::default();
        meta.raw
            .insert("Serial Number".to_string(), "MOS2E12345678".to_string());

        assert_eq!(meta.get("Serial Number"), Some("MOS2E12345678"));
    }
}
