//! Logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{LogConfig, DEFAULT_FILTER, LOG_FILE_NAME};

/// Filter from `directives`, falling back to [`DEFAULT_FILTER`] when they do not parse.
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log filter {:?} ({}), using {}", directives, e, DEFAULT_FILTER);
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Install the global tracing subscriber.
///
/// With a log directory, logs go to a daily-rotated file through a
/// non-blocking writer; the returned guard must be kept alive until exit so
/// buffered lines are flushed. Without one, logs go to stderr.
///
/// A directory that cannot be created falls back to stderr.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, String> {
    let log_dir = config.log_dir.as_ref().filter(|dir| match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
            false
        }
    });

    let (writer, guard, ansi) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(ansi);
    let fmt_layer = if config.json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(&config.log_level))
        .try_init()
        .map_err(|e| format!("Failed to install log subscriber: {}", e))?;

    tracing::debug!(
        log_file = ?config.log_file(),
        log_level = %config.log_level,
        json = config.json,
        "Logging initialized"
    );

    setup_panic_hook();
    Ok(guard)
}

/// Route panics through tracing before the default hook runs.
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");
        default_panic(panic_info);
    }));
}
