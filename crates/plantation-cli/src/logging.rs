//! Diagnostic output.
//!
//! stdout carries the protocol, so log lines go to stderr or, with `--log-file`, are appended
//! to a file. The filter comes from `RUST_LOG` and defaults to `info`.

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

pub(crate) fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    result.map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}
