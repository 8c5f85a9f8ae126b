//! Logging infrastructure.
//!
//! Structured logging via `tracing`, written to a daily-rotated file under
//! the user data directory. The terminal itself is never written to: the
//! alternate screen owns it while the grid is running.
//!
//! Filtering is configured through the WORDGRID_LOG environment variable
//! (`WORDGRID_LOG=debug`, `WORDGRID_LOG=wordgrid::history=trace`, ...);
//! the default level is info.

use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn logs_dir() -> std::io::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordgrid")
        .join("logs");
    fs::create_dir_all(&base)?;
    Ok(base)
}

/// Initialize the tracing subscriber with file logging. Failure to set up
/// the log file is reported once to stderr and otherwise ignored; the
/// application runs fine without logs.
pub fn init() {
    let filter = EnvFilter::try_from_env("WORDGRID_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match logs_dir() {
        Ok(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "wordgrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(filter),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry().with(file_layer).init();
}
