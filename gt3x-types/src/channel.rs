use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::{Gt3xError, Gt3xResult};

/// Количество кодов типа блока в таблице каналов (0..=26)
pub const CHANNEL_CODE_COUNT: usize = 27;

/// Канал журнала, определяемый кодом типа блока.
///
/// Таблица полная: каждому коду 0..=26 соответствует ровно один вариант,
/// коды без семантического имени отображаются в [`ChannelKind::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// Акселерометр, упакованные 12-битные выборки (код 0)
    Activity,
    /// Напряжение батареи (код 2)
    Battery,
    /// События устройства (код 3)
    Event,
    /// Пульс, уд/мин (код 4)
    HeartRateBpm,
    /// Датчик освещённости (код 5)
    Lux,
    /// Метаданные (код 6)
    Metadata,
    /// Метки (код 7)
    Tag,
    /// Эпохи (код 9)
    Epoch,
    /// Пульс, ANT+ (код 11)
    HeartRateAnt,
    /// Эпохи, вариант 2 (код 12)
    Epoch2,
    /// Емкостный датчик ношения (код 13)
    Capsense,
    /// Пульс, BLE (код 14)
    HeartRateBle,
    /// Эпохи, вариант 3 (код 15)
    Epoch3,
    /// Эпохи, вариант 4 (код 16)
    Epoch4,
    /// Параметры устройства (код 21)
    Parameters,
    /// Схема внешних сенсоров (код 24)
    SensorSchema,
    /// Данные внешних сенсоров (код 25)
    SensorData,
    /// Вторичный канал активности (код 26)
    Activity2,
    /// Зарезервированный код без имени (1, 8, 10, 17..=20, 22, 23)
    Reserved(u8),
}

/// Способ декодирования полезной нагрузки канала.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// 12-битные выборки, по две в 3 байтах, тройки осей
    Packed12Triaxial,
    /// u16 little-endian без масштабирования
    U16Le,
    /// Без декодирования, блоки как есть
    Raw,
}

impl ChannelKind {
    pub fn from_code(code: u8) -> Gt3xResult<Self> {
        let kind = match code {
            0 => ChannelKind::Activity,
            2 => ChannelKind::Battery,
            3 => ChannelKind::Event,
            4 => ChannelKind::HeartRateBpm,
            5 => ChannelKind::Lux,
            6 => ChannelKind::Metadata,
            7 => ChannelKind::Tag,
            9 => ChannelKind::Epoch,
            11 => ChannelKind::HeartRateAnt,
            12 => ChannelKind::Epoch2,
            13 => ChannelKind::Capsense,
            14 => ChannelKind::HeartRateBle,
            15 => ChannelKind::Epoch3,
            16 => ChannelKind::Epoch4,
            21 => ChannelKind::Parameters,
            24 => ChannelKind::SensorSchema,
            25 => ChannelKind::SensorData,
            26 => ChannelKind::Activity2,
            1 | 8 | 10 | 17..=20 | 22 | 23 => ChannelKind::Reserved(code),
            _ => return Err(Gt3xError::UnknownTypeCode(code)),
        };

        Ok(kind)
    }

    pub fn code(&self) -> u8 {
        match self {
            ChannelKind::Activity => 0,
            ChannelKind::Battery => 2,
            ChannelKind::Event => 3,
            ChannelKind::HeartRateBpm => 4,
            ChannelKind::Lux => 5,
            ChannelKind::Metadata => 6,
            ChannelKind::Tag => 7,
            ChannelKind::Epoch => 9,
            ChannelKind::HeartRateAnt => 11,
            ChannelKind::Epoch2 => 12,
            ChannelKind::Capsense => 13,
            ChannelKind::HeartRateBle => 14,
            ChannelKind::Epoch3 => 15,
            ChannelKind::Epoch4 => 16,
            ChannelKind::Parameters => 21,
            ChannelKind::SensorSchema => 24,
            ChannelKind::SensorData => 25,
            ChannelKind::Activity2 => 26,
            ChannelKind::Reserved(code) => *code,
        }
    }

    /// Имя канала. Зарезервированные коды получают имя `reserved_<код>`.
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            ChannelKind::Activity => "activity",
            ChannelKind::Battery => "battery",
            ChannelKind::Event => "event",
            ChannelKind::HeartRateBpm => "heart_rate_bpm",
            ChannelKind::Lux => "lux",
            ChannelKind::Metadata => "metadata",
            ChannelKind::Tag => "tag",
            ChannelKind::Epoch => "epoch",
            ChannelKind::HeartRateAnt => "heart_rate_ant",
            ChannelKind::Epoch2 => "epoch2",
            ChannelKind::Capsense => "capsense",
            ChannelKind::HeartRateBle => "heart_rate_ble",
            ChannelKind::Epoch3 => "epoch3",
            ChannelKind::Epoch4 => "epoch4",
            ChannelKind::Parameters => "parameters",
            ChannelKind::SensorSchema => "sensor_schema",
            ChannelKind::SensorData => "sensor_data",
            ChannelKind::Activity2 => "activity2",
            ChannelKind::Reserved(code) => return Cow::Owned(format!("reserved_{code}")),
        };

        Cow::Borrowed(name)
    }

    /// Поиск канала по имени (обратное к [`ChannelKind::name`]).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name() == name)
    }

    /// Все 27 каналов в порядке кодов.
    pub fn all() -> impl Iterator<Item = ChannelKind> {
        (0..CHANNEL_CODE_COUNT as u8).filter_map(|code| Self::from_code(code).ok())
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, ChannelKind::Reserved(_))
    }

    pub fn encoding(&self) -> SampleEncoding {
        match self {
            ChannelKind::Activity => SampleEncoding::Packed12Triaxial,
            ChannelKind::Lux | ChannelKind::Battery => SampleEncoding::U16Le,
            _ => SampleEncoding::Raw,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для ChannelKind
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for ChannelKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown channel name: '{s}'"))
    }
}

impl Serialize for ChannelKind {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}
