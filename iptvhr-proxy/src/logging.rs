//! Console and file logging.
//!
//! Log files rotate daily and files older than the retention period are
//! removed at startup.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "iptvhr-proxy.log";

/// Initialize console and file logging.
///
/// `RUST_LOG` takes precedence, then `verbose` (debug), then `level`,
/// then info.
pub fn init_logging(
    log_dir: &Path,
    retention_days: u64,
    verbose: bool,
    level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(log_dir)?;
    clean_old_logs(log_dir, retention_days)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer flushes on drop; keep it for the whole process.
    std::mem::forget(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stdout)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_timer(LocalTimeTimer),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_timer(LocalTimeTimer),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set default subscriber: {}", e))?;

    // Route log:: macros into tracing.
    tracing_log::LogTracer::init().map_err(|e| format!("Failed to initialize LogTracer: {}", e))?;

    Ok(())
}

fn default_directive(verbose: bool, level: Option<&str>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        level.unwrap_or("info").to_string()
    }
}

/// Remove log files older than `retention_days`.
fn clean_old_logs(log_dir: &Path, retention_days: u64) -> io::Result<()> {
    if !log_dir.exists() {
        return Ok(());
    }

    // Retention too long to represent means nothing is old enough to delete.
    let Some(cutoff) = i64::try_from(retention_days)
        .ok()
        .and_then(chrono::Duration::try_days)
        .and_then(|retention| Local::now().checked_sub_signed(retention))
    else {
        return Ok(());
    };

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_log = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.contains(LOG_FILE_NAME))
                .unwrap_or(false);
        if !is_log {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => chrono::DateTime::<Local>::from(modified),
            Err(_) => continue,
        };
        if modified < cutoff {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("Failed to remove old log file {:?}: {}", path, e);
            }
        }
    }

    Ok(())
}

/// Local time formatting for log lines.
#[derive(Debug, Clone, Copy)]
struct LocalTimeTimer;

impl fmt::time::FormatTime for LocalTimeTimer {
    fn format_time(&self, w: &mut fmt::format::Writer) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"))
    }
}
