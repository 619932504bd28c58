use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// 日志文件句柄，guard 被 drop 时刷新缓冲区
pub struct LogHandle {
    pub file_path: PathBuf,
    _guard: WorkerGuard,
}

/// 每次运行一个日志文件：trading_bot_YYYYMMDD_HHMMSS.log
pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("trading_bot_{}.log", now.format("%Y%m%d_%H%M%S"))
}

// 设置日志
pub fn setup_logging(log_dir: &Path) -> anyhow::Result<LogHandle> {
    fs::create_dir_all(log_dir)?;

    let file_name = log_file_name(Local::now());
    let file_path = log_dir.join(&file_name);
    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, &file_name);
    let (file_non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
                .with_writer(file_non_blocking)
                .with_filter(EnvFilter::new(format!(
                    "info,{}=debug",
                    env!("CARGO_CRATE_NAME")
                ))),
        )
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new("info")),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(LogHandle {
        file_path,
        _guard: guard,
    })
}
