//! Tracing setup driven by the logger section of the configuration.

use std::fs::OpenOptions;
use std::io;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::config::LoggerConfig;

/// Install the global subscriber. The returned guard must stay alive for the
/// lifetime of the process when logging to a file, otherwise buffered lines
/// are lost on exit.
pub fn init(config: &LoggerConfig) -> Result<Option<WorkerGuard>> {
    let level: tracing::Level = config
        .level
        .parse()
        .with_context(|| format!("unknown log level '{}' (LOGGER_LEVEL)", config.level))?;
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let (writer, guard) = match config.output.as_str() {
        "stdout" => (BoxMakeWriter::new(io::stdout), None),
        "stderr" => (BoxMakeWriter::new(io::stderr), None),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{path}' (LOGGER_OUTPUT)"))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.formatter.as_str() {
        "text" => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
        }
        // Anything else falls back to JSON, the default formatter.
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .init();
        }
    }

    Ok(guard)
}
