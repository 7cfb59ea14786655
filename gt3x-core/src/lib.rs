//! Декодер журнала активности ActiGraph GT3X
//!
//! Файл .gt3x — zip-архив с текстовыми метаданными `info.txt` и бинарным
//! журналом `log.bin`. Журнал разбирается на блоки, блоки раскладываются по
//! каналам, а каналы акселерометра, освещённости и батареи декодируются в
//! числовые выборки.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use gt3x_core::read_gt3x;
//!
//! let log = read_gt3x("subject.gt3x")?;
//! println!("channels: {:?}", log.list_channels());
//!
//! let activity = log.get_channel("activity")?;
//! if let Some(acc) = activity.samples.as_acceleration() {
//!     println!("{} samples, first: {:?}", acc.len(), acc.first());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod binary;
pub mod codec;
pub mod config;
pub mod decode;
pub mod demux;
pub mod format;
pub mod metadata;
pub mod reader;

pub use archive::*;
pub use codec::*;
pub use config::*;
pub use decode::*;
pub use demux::*;
pub use format::*;
pub use gt3x_types::*;
pub use metadata::*;
pub use reader::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
