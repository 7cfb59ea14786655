use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gt3x_core::{read_gt3x_with_config, DecodeConfig};
use log::{error, info, LevelFilter};

mod report;

use report::{render_dump, render_info, InfoReport};

#[derive(Parser, Debug)]
#[command(
    name = "gt3x",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect ActiGraph .gt3x activity logs",
    long_about = None,
)]
struct Cli {
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Подробный вывод декодера
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Метаданные и сводка по каналам
    Info {
        file: PathBuf,
        /// Вывод в формате JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Имена присутствующих каналов
    Channels {
        file: PathBuf,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Времена блоков и выборки одного канала
    Dump {
        file: PathBuf,
        /// Имя канала: activity, lux, battery, ...
        channel: String,
        /// Ограничение числа строк выборок
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Масштаб акселерометра, если в info.txt нет `Acceleration Scale`
    #[arg(long)]
    scale: Option<f64>,
    /// Не отбрасывать укороченный последний блок активности
    #[arg(long)]
    no_repair: bool,
}

impl DecodeArgs {
    fn config(&self) -> DecodeConfig {
        DecodeConfig {
            fallback_scale: self.scale,
            repair_truncated_tail: !self.no_repair,
            ..DecodeConfig::default()
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Info { file, json, decode } => {
            let log = read_gt3x_with_config(&file, &decode.config())
                .with_context(|| format!("failed to decode {}", file.display()))?;
            let report = InfoReport::new(&file, &log);

            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", render_info(&report));
            }
        }
        Command::Channels { file, decode } => {
            let log = read_gt3x_with_config(&file, &decode.config())
                .with_context(|| format!("failed to decode {}", file.display()))?;

            for name in log.list_channels() {
                println!("{name}");
            }
        }
        Command::Dump {
            file,
            channel,
            limit,
            decode,
        } => {
            let log = read_gt3x_with_config(&file, &decode.config())
                .with_context(|| format!("failed to decode {}", file.display()))?;
            let channel = log.get_channel(&channel)?;

            for line in render_dump(channel, limit) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .init();

    info!("gt3x {}", gt3x_core::VERSION);

    if let Err(e) = run(cli.command) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
