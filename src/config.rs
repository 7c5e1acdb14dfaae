use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::run::shellexpand;

/// Overrides the ledger location when `--ledger` is not given.
pub(crate) const LEDGER_ENV: &str = "TALLY_LEDGER";

const LEDGER_FILE: &str = "expenses_data.csv";
const LOG_FILE: &str = "tally.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) ledger_path: PathBuf,
    /// Where the TUI writes its log. Sits next to the ledger.
    pub(crate) log_path: PathBuf,
}

impl Config {
    /// Resolve from the process environment. A `--ledger <path>` pair is
    /// removed from `args` so the command dispatch never sees it.
    pub(crate) fn from_args(args: &mut Vec<String>) -> Result<Self> {
        let flag = take_flag(args, "--ledger")?;
        Self::resolve(flag, std::env::var_os(LEDGER_ENV), default_data_dir)
    }

    /// Priority: flag, then environment, then the platform data directory.
    pub(crate) fn resolve(
        flag: Option<String>,
        env: Option<OsString>,
        data_dir: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let ledger_path = match (flag, env.filter(|v| !v.is_empty())) {
            (Some(path), _) => PathBuf::from(shellexpand(&path)),
            (None, Some(path)) => PathBuf::from(path),
            (None, None) => data_dir()?.join(LEDGER_FILE),
        };
        let log_path = ledger_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(LOG_FILE);
        Ok(Self {
            ledger_path,
            log_path,
        })
    }
}

/// Remove `name <value>` from `args`, returning the value.
fn take_flag(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("{name} requires a path");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "tally", "Tally")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
