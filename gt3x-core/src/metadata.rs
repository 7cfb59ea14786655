//! Разбор `info.txt`: строки вида `Ключ: значение`, по одной на строку.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use gt3x_types::{Gt3xError, Gt3xResult, Metadata};

/// Тиков (по 100 нс) в одной микросекунде
pub const TICKS_PER_MICROSECOND: i64 = 10;

/// Разбивает текст метаданных на пары ключ/значение.
///
/// Строки без `:` пропускаются. У значения отрезается последний символ
/// (ожидается `\r` от CRLF), даже если это не `\r`. Повторный ключ
/// перезаписывает предыдущий.
pub fn tokenize_info(text: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for line in text.split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let mut chars = value.chars();
        chars.next_back();
        fields.insert(key.to_string(), chars.as_str().to_string());
    }

    fields
}

/// Переводит тики .NET (100 нс от 0001-01-01 00:00:00) в дату и время.
///
/// `None`, если результат вне диапазона `NaiveDateTime`.
pub fn ticks_to_datetime(ticks: i64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)?;

    epoch
        .checked_add_signed(Duration::microseconds(ticks / TICKS_PER_MICROSECOND))?
        .checked_add_signed(Duration::nanoseconds((ticks % TICKS_PER_MICROSECOND) * 100))
}

/// Разбирает текст `info.txt` в типизированные метаданные.
pub fn parse_metadata(text: &str) -> Gt3xResult<Metadata> {
    map_metadata(tokenize_info(text))
}

/// Преобразует пары ключ/значение в [`Metadata`].
///
/// Отсутствующий ключ даёт `None`; присутствующее, но неразборчивое значение
/// даёт [`Gt3xError::Metadata`].
pub fn map_metadata(fields: BTreeMap<String, String>) -> Gt3xResult<Metadata> {
    Ok(Metadata {
        sample_rate: field(&fields, "Sample Rate", parse_number)?,
        acceleration_min: field(&fields, "Acceleration Min", parse_number)?,
        acceleration_max: field(&fields, "Acceleration Max", parse_number)?,
        acceleration_scale: field(&fields, "Acceleration Scale", parse_number)?,
        start_date: field(&fields, "Start Date", parse_ticks)?,
        stop_date: field(&fields, "Stop Date", parse_ticks)?,
        last_sample_time: field(&fields, "Last Sample Time", parse_ticks)?,
        date_of_birth: field(&fields, "DateOfBirth", parse_ticks)?,
        age: field(&fields, "Age", parse_number)?,
        sex: fields.get("Sex").cloned(),
        raw: fields,
    })
}

fn field<T, F>(
    fields: &BTreeMap<String, String>,
    key: &str,
    convert: F,
) -> Gt3xResult<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    fields
        .get(key)
        .map(|value| {
            convert(value.as_str()).map_err(|reason| Gt3xError::metadata(key, value.as_str(), reason))
        })
        .transpose()
}

fn parse_number<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| e.to_string())
}

fn parse_ticks(value: &str) -> Result<NaiveDateTime, String> {
    let ticks: i64 = parse_number(value)?;
    ticks_to_datetime(ticks).ok_or_else(|| format!("{ticks} ticks is out of datetime range"))
}
