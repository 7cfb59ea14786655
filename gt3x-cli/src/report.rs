use std::{fmt::Write, path::Path};

use gt3x_core::{ActivityLog, Channel, ChannelSummary, Metadata, Samples};
use serde::Serialize;

/// Сводка по файлу для `gt3x info --json`.
#[derive(Debug, Serialize)]
pub struct InfoReport<'a> {
    pub file: String,
    pub metadata: &'a Metadata,
    pub channels: Vec<ChannelSummary>,
}

impl<'a> InfoReport<'a> {
    pub fn new(
        path: &Path,
        log: &'a ActivityLog,
    ) -> Self {
        Self {
            file: path.display().to_string(),
            metadata: log.metadata(),
            channels: log.summary(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// Текстовая сводка: метаданные и таблица каналов.
pub fn render_info(report: &InfoReport<'_>) -> String {
    let m = report.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "File              : {}", report.file);
    let _ = writeln!(out, "Sample rate       : {}", opt(&m.sample_rate));
    let _ = writeln!(out, "Acceleration scale: {}", opt(&m.acceleration_scale));
    let _ = writeln!(
        out,
        "Acceleration range: {} .. {}",
        opt(&m.acceleration_min),
        opt(&m.acceleration_max)
    );
    let _ = writeln!(out, "Start date        : {}", opt(&m.start_date));
    let _ = writeln!(out, "Stop date         : {}", opt(&m.stop_date));
    let _ = writeln!(out, "Last sample time  : {}", opt(&m.last_sample_time));
    let _ = writeln!(out, "Age / sex         : {} / {}", opt(&m.age), opt(&m.sex));

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<16} {:>4} {:>8} {:>10} {:>12} {:>12}",
        "channel", "code", "blocks", "samples", "first ts", "last ts"
    );
    for c in &report.channels {
        let _ = writeln!(
            out,
            "{:<16} {:>4} {:>8} {:>10} {:>12} {:>12}",
            c.name,
            c.code,
            c.blocks,
            c.samples,
            opt(&c.first_timestamp),
            opt(&c.last_timestamp)
        );
    }

    out
}

/// Строки для `gt3x dump`: время блоков, затем выборки (не больше `limit`).
pub fn render_dump(
    channel: &Channel,
    limit: Option<usize>,
) -> Vec<String> {
    let take = limit.unwrap_or(usize::MAX);
    let mut lines = Vec::new();

    lines.push(format!(
        "# {} (code {}), {} blocks",
        channel.kind,
        channel.kind.code(),
        channel.timestamps.len()
    ));
    lines.push(format!(
        "# timestamps: {:?}",
        channel.timestamps.iter().take(take).collect::<Vec<_>>()
    ));

    match &channel.samples {
        Samples::Acceleration(v) => {
            lines.extend(
                v.iter()
                    .take(take)
                    .map(|[x, y, z]| format!("{x:.6}\t{y:.6}\t{z:.6}")),
            );
        }
        Samples::UInt16(v) => lines.extend(v.iter().take(take).map(u16::to_string)),
        Samples::Raw(v) => lines.extend(v.iter().take(take).map(hex::encode)),
    }

    lines
}
