//! Декодирование данных каналов в типизированные выборки.
//!
//! Акселерометр хранит по две 12-битные выборки в каждых 3 байтах:
//!
//! ```text
//! b0        b1        b2
//! aaaaaaaa  aaaabbbb  bbbbbbbb
//! ```
//!
//! Выборки — 12-битный дополнительный код, после расширения знака делятся
//! на масштаб из метаданных и группируются по тройкам осей. Устройство пишет
//! оси в порядке (y, x, z), поэтому первые две компоненты меняются местами.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use gt3x_types::{ChannelKind, Metadata, SampleEncoding};
use log::{debug, warn};

use crate::{config::DecodeConfig, demux::ChunkList};

/// Максимальное значение 12-битной выборки без знака
pub const UINT12_MAX: u16 = 0x0FFF;

/// Максимальное положительное значение 12-битной выборки со знаком
pub const INT12_MAX: u16 = 2047;

/// Декодированные выборки канала.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// Ускорение по осям (x, y, z), в g
    Acceleration(Vec<[f64; 3]>),
    /// u16 little-endian (освещённость, батарея)
    UInt16(Vec<u16>),
    /// Данные блоков без декодирования
    Raw(Vec<Vec<u8>>),
}

/// Канал после декодирования: времена блоков и выборки.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub kind: ChannelKind,
    pub timestamps: Vec<u32>,
    pub samples: Samples,
}

/// Откуда взят масштаб акселерометра.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleSource {
    /// `Acceleration Scale` из info.txt
    Metadata,
    /// `DecodeConfig::fallback_scale` (или `--scale`)
    Config,
}

impl fmt::Display for ScaleSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ScaleSource::Metadata => write!(f, "info.txt 'Acceleration Scale'"),
            ScaleSource::Config => write!(f, "configured fallback scale"),
        }
    }
}

/// Кодек выборок с параметрами одного сеанса декодирования.
#[derive(Debug, Clone, Copy)]
pub struct SampleCodec {
    scale: Option<(f64, ScaleSource)>,
    repair_truncated_tail: bool,
}

impl Samples {
    /// Количество элементов: тройки, u16 или блоки.
    pub fn len(&self) -> usize {
        match self {
            Samples::Acceleration(v) => v.len(),
            Samples::UInt16(v) => v.len(),
            Samples::Raw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_acceleration(&self) -> Option<&[[f64; 3]]> {
        match self {
            Samples::Acceleration(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Samples::UInt16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[Vec<u8>]> {
        match self {
            Samples::Raw(v) => Some(v),
            _ => None,
        }
    }
}

impl SampleCodec {
    /// `scale` — делитель для акселерометра (из метаданных). Без него канал
    /// остаётся сырым.
    pub fn new(
        scale: Option<f64>,
        repair_truncated_tail: bool,
    ) -> Self {
        Self {
            scale: scale.map(|s| (s, ScaleSource::Metadata)),
            repair_truncated_tail,
        }
    }

    /// Масштаб из метаданных, при его отсутствии — из конфигурации.
    pub fn from_config(
        metadata: &Metadata,
        config: &DecodeConfig,
    ) -> Self {
        let scale = match (metadata.acceleration_scale, config.fallback_scale) {
            (Some(s), _) => Some((s, ScaleSource::Metadata)),
            (None, Some(s)) => Some((s, ScaleSource::Config)),
            (None, None) => None,
        };

        Self {
            scale,
            repair_truncated_tail: config.repair_truncated_tail,
        }
    }

    pub fn scale(&self) -> Option<(f64, ScaleSource)> {
        self.scale
    }

    /// Декодирует список блоков канала согласно его типу.
    ///
    /// Нулевой или нечисловой масштаб не ошибка: канал акселерометра
    /// остаётся сырым, как и без масштаба.
    pub fn decode(
        &self,
        mut list: ChunkList,
    ) -> Channel {
        let samples = match (list.kind.encoding(), self.scale) {
            (SampleEncoding::Packed12Triaxial, Some((scale, _))) if is_usable_scale(scale) => {
                if self.repair_truncated_tail && drop_truncated_tail(&mut list) {
                    warn!(
                        "Dropped short final {} block ({} blocks left)",
                        list.kind,
                        list.len()
                    );
                }
                Samples::Acceleration(decode_acceleration(&list.chunks, scale))
            }
            (SampleEncoding::Packed12Triaxial, Some((scale, source))) => {
                warn!(
                    "Unusable acceleration scale {scale} from {source}, keeping {} as raw blocks",
                    list.kind
                );
                Samples::Raw(list.chunks)
            }
            (SampleEncoding::Packed12Triaxial, None) => {
                warn!(
                    "No acceleration scale available, keeping {} as raw blocks",
                    list.kind
                );
                Samples::Raw(list.chunks)
            }
            (SampleEncoding::U16Le, _) => Samples::UInt16(decode_u16_le(&list.chunks)),
            (SampleEncoding::Raw, _) => Samples::Raw(list.chunks),
        };

        debug!(
            "Decoded {}: {} blocks -> {} samples",
            list.kind,
            list.timestamps.len(),
            samples.len()
        );

        Channel {
            kind: list.kind,
            timestamps: list.timestamps,
            samples,
        }
    }
}

/// Масштаб пригоден для деления: конечный и ненулевой.
pub fn is_usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale != 0.0
}

/// Распаковывает пары 12-битных выборок из каждых 3 байт.
///
/// `[0x12, 0x34, 0x56]` → `[0x123, 0x456]`. Неполная группа в конце
/// буфера игнорируется.
pub fn unpack_uint12(buf: &[u8]) -> Vec<u16> {
    let groups = buf.chunks_exact(3);
    let rest = groups.remainder().len();
    if rest != 0 {
        warn!("12-bit buffer of {} bytes has {rest} trailing bytes", buf.len());
    }

    let mut out = Vec::with_capacity(buf.len() / 3 * 2);
    for g in groups {
        let (b0, b1, b2) = (g[0] as u16, g[1] as u16, g[2] as u16);
        out.push((b0 << 4) | (b1 >> 4));
        out.push(((b1 & 0x0F) << 8) | b2);
    }
    out
}

/// Расширение знака 12-битной выборки до i16.
///
/// Область определения 0..=4095, значения 0..=2047 остаются положительными,
/// 2048..=4095 отображаются в -2048..=-1.
pub fn sign_extend_12(raw: u16) -> i16 {
    debug_assert!(raw <= UINT12_MAX, "not a 12-bit value: {raw}");

    if raw > INT12_MAX {
        (raw | 0xF000) as i16
    } else {
        raw as i16
    }
}

/// Перестановка осей устройства: (a, b, c) → (b, a, c).
pub fn reorder_axes([a, b, c]: [f64; 3]) -> [f64; 3] {
    [b, a, c]
}

/// Отбрасывает последний блок (и его время), если его длина отличается от
/// длины первого. Возвращает `true`, если блок был отброшен.
///
/// Проверяется только последний блок.
pub fn drop_truncated_tail(list: &mut ChunkList) -> bool {
    let (Some(first), Some(last)) = (list.chunks.first(), list.chunks.last()) else {
        return false;
    };

    if first.len() == last.len() {
        return false;
    }

    list.chunks.pop();
    list.timestamps.pop();
    true
}

/// Декодирует склеенные блоки акселерометра в тройки ускорений.
pub fn decode_acceleration(
    chunks: &[Vec<u8>],
    scale: f64,
) -> Vec<[f64; 3]> {
    let raw = unpack_uint12(&chunks.concat());

    let values = raw.chunks_exact(3);
    let rest = values.remainder().len();
    if rest != 0 {
        warn!("{} acceleration values do not form whole triples, dropping {rest}", raw.len());
    }

    values
        .map(|t| reorder_axes([t[0], t[1], t[2]].map(|s| sign_extend_12(s) as f64 / scale)))
        .collect()
}

/// Склеивает блоки и читает их как u16 little-endian.
pub fn decode_u16_le(chunks: &[Vec<u8>]) -> Vec<u16> {
    let buf = chunks.concat();
    if buf.len() % 2 != 0 {
        warn!("u16 buffer of odd length {}, ignoring last byte", buf.len());
    }

    let mut out = vec![0u16; buf.len() / 2];
    LittleEndian::read_u16_into(&buf[..out.len() * 2], &mut out);
    out
}
