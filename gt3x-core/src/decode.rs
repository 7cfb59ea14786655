use gt3x_types::{ChannelKind, Gt3xError, Gt3xResult, Metadata};
use log::{debug, info};
use serde::Serialize;

use crate::{
    codec::{Channel, SampleCodec},
    config::DecodeConfig,
    demux::ChannelDemultiplexer,
    metadata::parse_metadata,
    reader::{read_all_blocks, BlockReader},
};

/// Полностью декодированный журнал: метаданные и каналы.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLog {
    metadata: Metadata,
    /// Каналы в порядке первого появления в потоке
    channels: Vec<Channel>,
}

/// Краткая сводка по каналу.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub code: u8,
    pub blocks: usize,
    pub samples: usize,
    pub first_timestamp: Option<u32>,
    pub last_timestamp: Option<u32>,
}

impl ActivityLog {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Имена присутствующих каналов по порядку первого появления.
    pub fn list_channels(&self) -> Vec<String> {
        self.channels
            .iter()
            .map(|c| c.kind.name().into_owned())
            .collect()
    }

    pub fn channel(
        &self,
        kind: ChannelKind,
    ) -> Option<&Channel> {
        self.channels.iter().find(|c| c.kind == kind)
    }

    pub fn channel_by_code(
        &self,
        code: u8,
    ) -> Option<&Channel> {
        self.channels.iter().find(|c| c.kind.code() == code)
    }

    /// Канал по имени; отсутствующий — [`Gt3xError::ChannelNotFound`] со
    /// списком имеющихся каналов.
    pub fn get_channel(
        &self,
        name: &str,
    ) -> Gt3xResult<&Channel> {
        ChannelKind::from_name(name)
            .and_then(|kind| self.channel(kind))
            .ok_or_else(|| Gt3xError::ChannelNotFound {
                name: name.to_string(),
                available: self.list_channels(),
            })
    }

    pub fn summary(&self) -> Vec<ChannelSummary> {
        self.channels
            .iter()
            .map(|c| ChannelSummary {
                name: c.kind.name().into_owned(),
                code: c.kind.code(),
                blocks: c.timestamps.len(),
                samples: c.samples.len(),
                first_timestamp: c.timestamps.first().copied(),
                last_timestamp: c.timestamps.last().copied(),
            })
            .collect()
    }
}

/// Декодирует метаданные и поток блоков с параметрами по умолчанию.
pub fn decode(
    metadata_text: &str,
    block_stream: &[u8],
) -> Gt3xResult<ActivityLog> {
    decode_with_config(metadata_text, block_stream, &DecodeConfig::default())
}

pub fn decode_with_config(
    metadata_text: &str,
    block_stream: &[u8],
    config: &DecodeConfig,
) -> Gt3xResult<ActivityLog> {
    let metadata = parse_metadata(metadata_text)?;

    let mut reader = BlockReader::new(block_stream);
    let blocks = read_all_blocks(&mut reader)?;
    let block_count = blocks.len();
    let demux = ChannelDemultiplexer::demultiplex(blocks)?;

    for kind in [ChannelKind::Activity, ChannelKind::Lux, ChannelKind::Battery] {
        if demux.by_kind(kind).is_none() {
            info!("No {kind} data found in log");
        }
    }

    let codec = SampleCodec::from_config(&metadata, config);
    if let Some((scale, source)) = codec.scale() {
        debug!("Acceleration scale {scale} from {source}");
    }

    let channels: Vec<Channel> = demux
        .into_channels()
        .into_iter()
        .map(|list| codec.decode(list))
        .collect();

    info!(
        "Decoded {block_count} blocks ({} bytes) into {} channels",
        reader.stats().bytes_processed,
        channels.len()
    );

    Ok(ActivityLog { metadata, channels })
}

/// Имена присутствующих каналов (см. [`ActivityLog::list_channels`]).
pub fn list_channels(log: &ActivityLog) -> Vec<String> {
    log.list_channels()
}

/// Канал по имени (см. [`ActivityLog::get_channel`]).
pub fn get_channel<'a>(
    log: &'a ActivityLog,
    name: &str,
) -> Gt3xResult<&'a Channel> {
    log.get_channel(name)
}
