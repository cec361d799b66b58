//! Logging init: append to a file, or discard when no file is given.
//!
//! The TUI owns stdout and stderr while it runs, so log output never goes to
//! the terminal.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,linklux=debug";

/// Writer that is either the log file or a sink (used when the file clone fails).
enum FileOrSink {
    File(fs::File),
    Sink,
}

impl io::Write for FileOrSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrSink::File(f) => f.write(buf),
            FileOrSink::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrSink::File(f) => f.flush(),
            FileOrSink::Sink => Ok(()),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrSink::File)
            .unwrap_or(FileOrSink::Sink)
    }
}

/// Initialize structured logging.
///
/// With `log_file`, events are appended to that file (parent directories are
/// created). Without it, events are filtered and dropped.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory '{}'", parent.display())
                })?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            BoxMakeWriter::new(FileMakeWriter(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    match log_file {
        Some(path) => tracing::info!("linklux logging initialized at {}", path.display()),
        None => tracing::debug!("linklux logging initialized without a log file"),
    }

    Ok(())
}
