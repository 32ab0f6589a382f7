use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub const LOG_FILE: &str = "download_log.txt";

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber: stderr plus `<log_dir>/download_log.txt`.
///
/// The returned guard flushes the file writer on drop and must live until
/// the program exits. If the log directory cannot be created, logs go to
/// stderr only and `None` is returned.
pub fn init(verbose: u8, log_dir: &Path) -> Option<WorkerGuard> {
    let level_filter = level_for(verbose);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PINFETCH_LOG")
        .from_env_lossy();

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "warning: could not create log directory {}: {e}; logging to stderr only",
            log_dir.display()
        );
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
        return None;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr.and(file_writer))
        .with_ansi(false)
        .try_init();

    Some(guard)
}
