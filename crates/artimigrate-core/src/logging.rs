use std::fs::OpenOptions;
use std::path::{
    Path,
    PathBuf,
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str =
    "artimigrate=info,artimigrate_core=info,artimigrate_jfrog=info,artimigrate_bkrepo=info";

/// Per-project log file, appended to across runs
pub fn log_file_path(log_dir: &Path, project: &str) -> PathBuf {
    log_dir.join(format!("{project}.log"))
}

/// Installs stdout and file logging; the returned guard flushes the file
/// writer on drop and must be held for the whole run
pub fn init(log_dir: &Path, project: &str) -> std::io::Result<WorkerGuard> {
    init_with_default(log_dir, project, DEFAULT_LOG_FILTER)
}

pub fn init_with_default(
    log_dir: &Path, project: &str, default_filter: &str,
) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(log_dir, project))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Ok(guard)
}
