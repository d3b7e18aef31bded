//! Process-wide logging, set up once from `main`.
//!
//! Two sinks: stderr (with colors) and a plain-text log file.
//! Filter comes from `RUST_LOG`, defaulting to debug for this crate.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "wave=debug";

pub fn init(log_file: &Path) -> anyhow::Result<()> {
    let file = open_log_file(log_file)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()?;

    tracing::info!(log_file = %log_file.display(), "logging initialized");
    Ok(())
}

/// Append mode; creates missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}
