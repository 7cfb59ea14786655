use gt3x_types::{ChannelKind, Gt3xError, Gt3xResult, LogBlock, CHANNEL_CODE_COUNT};

/// Блоки одного канала в порядке поступления.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkList {
    pub kind: ChannelKind,
    pub timestamps: Vec<u32>,
    pub chunks: Vec<Vec<u8>>,
}

/// Раскладывает блоки по каналам по коду типа.
///
/// Порядок блоков внутри канала сохраняется, порядок каналов — по первому
/// появлению в потоке.
#[derive(Debug, Clone)]
pub struct ChannelDemultiplexer {
    slots: Vec<Option<ChunkList>>,
    order: Vec<u8>,
}

impl ChunkList {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            timestamps: Vec::new(),
            chunks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl ChannelDemultiplexer {
    pub fn new() -> Self {
        Self {
            slots: (0..CHANNEL_CODE_COUNT).map(|_| None).collect(),
            order: Vec::new(),
        }
    }

    /// Раскладывает последовательность блоков целиком.
    pub fn demultiplex<I>(blocks: I) -> Gt3xResult<Self>
    where
        I: IntoIterator<Item = LogBlock>,
    {
        let mut demux = Self::new();
        for block in blocks {
            demux.push(block)?;
        }
        Ok(demux)
    }

    /// Добавляет блок в список его канала. Код вне 0..=26 — ошибка формата.
    pub fn push(
        &mut self,
        block: LogBlock,
    ) -> Gt3xResult<()> {
        let kind = ChannelKind::from_code(block.type_code)?;
        let code = block.type_code;

        let slot = &mut self.slots[code as usize];
        if slot.is_none() {
            self.order.push(code);
        }

        let list = slot.get_or_insert_with(|| ChunkList::new(kind));
        list.timestamps.push(block.timestamp);
        list.chunks.push(block.payload);

        Ok(())
    }

    /// Каналы, получившие хотя бы один блок, по порядку первого появления.
    pub fn kinds(&self) -> impl Iterator<Item = ChannelKind> + '_ {
        self.order
            .iter()
            .filter_map(|&code| self.slots[code as usize].as_ref())
            .map(|list| list.kind)
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.kinds().map(|kind| kind.name().into_owned()).collect()
    }

    pub fn by_code(
        &self,
        code: u8,
    ) -> Option<&ChunkList> {
        self.slots.get(code as usize)?.as_ref()
    }

    pub fn by_kind(
        &self,
        kind: ChannelKind,
    ) -> Option<&ChunkList> {
        self.by_code(kind.code())
    }

    /// Поиск по имени; отсутствующий канал — [`Gt3xError::ChannelNotFound`].
    pub fn by_name(
        &self,
        name: &str,
    ) -> Gt3xResult<&ChunkList> {
        ChannelKind::from_name(name)
            .and_then(|kind| self.by_kind(kind))
            .ok_or_else(|| Gt3xError::ChannelNotFound {
                name: name.to_string(),
                available: self.channel_names(),
            })
    }

    /// Забирает списки каналов в порядке первого появления.
    pub fn into_channels(mut self) -> Vec<ChunkList> {
        self.order
            .iter()
            .filter_map(|&code| self.slots[code as usize].take())
            .collect()
    }
}

impl Default for ChannelDemultiplexer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(
        code: u8,
        ts: u32,
        payload: &[u8],
    ) -> LogBlock {
        LogBlock::new(code, ts, payload.to_vec())
    }

    #[test]
    fn test_groups_by_code_in_order() {
        let demux = ChannelDemultiplexer::demultiplex(vec![
            block(5, 10, &[1, 0]),
            block(0, 11, &[1, 2, 3]),
            block(5, 12, &[2, 0]),
            block(0, 13, &[4, 5, 6]),
        ])
        .unwrap();

        let lux = demux.by_name("lux").unwrap();
        assert_eq!(lux.timestamps, vec![10, 12]);
        assert_eq!(lux.chunks, vec![vec![1, 0], vec![2, 0]]);

        let activity = demux.by_code(0).unwrap();
        assert_eq!(activity.kind, ChannelKind::Activity);
        assert_eq!(activity.timestamps, vec![11, 13]);
        assert_eq!(activity.chunks, vec![vec![1, 2, 3], vec![4, 5, 6]]);

        assert_eq!(demux.channel_names(), vec!["lux", "activity"]);
    }

    #[test]
    fn test_reserved_code_is_grouped() {
        let demux = ChannelDemultiplexer::demultiplex(vec![block(8, 1, &[9])]).unwrap();

        let list = demux.by_code(8).unwrap();
        assert_eq!(list.kind, ChannelKind::Reserved(8));
        assert_eq!(demux.channel_names(), vec!["reserved_8"]);
        assert!(demux.by_name("reserved_8").is_ok());
    }

    #[test]
    fn test_out_of_range_code_is_format_error() {
        let err = ChannelDemultiplexer::demultiplex(vec![block(0, 1, &[]), block(27, 2, &[])])
            .unwrap_err();

        assert!(matches!(err, Gt3xError::UnknownTypeCode(27)));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_absent_channel_lookup() {
        let demux = ChannelDemultiplexer::demultiplex(vec![block(0, 1, &[1, 2, 3])]).unwrap();

        assert!(demux.by_code(2).is_none());
        assert!(demux.by_code(200).is_none());

        match demux.by_name("battery") {
            Err(Gt3xError::ChannelNotFound { name, available }) => {
                assert_eq!(name, "battery");
                assert_eq!(available, vec!["activity"]);
            }
            other => panic!("expected ChannelNotFound, got {other:?}"),
        }

        assert!(matches!(
            demux.by_name("no_such_channel"),
            Err(Gt3xError::ChannelNotFound { .. })
        ));
    }

    #[test]
    fn test_into_channels_order() {
        let demux = ChannelDemultiplexer::demultiplex(vec![
            block(2, 1, &[0, 1]),
            block(26, 2, &[7]),
            block(2, 3, &[0, 2]),
        ])
        .unwrap();

        let kinds: Vec<ChannelKind> = demux.into_channels().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChannelKind::Battery, ChannelKind::Activity2]);
    }
}
