use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `tally=debug`.
pub(crate) const LOG_ENV: &str = "TALLY_LOG";

pub(crate) enum LogTarget {
    /// One-shot commands: warnings and errors next to the output.
    Stderr,
    /// The TUI owns the terminal, so logs are appended to a file.
    File(PathBuf),
}

impl LogTarget {
    fn default_directive(&self) -> &'static str {
        match self {
            Self::Stderr => "tally=warn",
            Self::File(_) => "tally=info",
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
pub(crate) fn init(target: LogTarget) -> Result<()> {
    let mut outcome = Ok(());
    TRACING_INIT.call_once(|| outcome = install(target));
    outcome
}

fn install(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()));

    let installed = match target {
        LogTarget::Stderr => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))
}
