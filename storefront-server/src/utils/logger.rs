//! Logging Infrastructure
//!
//! Console output by default; a daily rolling file under `log_dir` when set.
//! `RUST_LOG` overrides the configured level.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},sqlx=warn,tower_http=info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "storefront-server");
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Cannot create log directory {dir}, logging to stdout");
    }

    let _ = subscriber.try_init();
}
