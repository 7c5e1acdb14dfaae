#![allow(clippy::unwrap_used)]

use std::ffi::OsString;
use std::path::PathBuf;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn no_data_dir() -> Result<PathBuf> {
    anyhow::bail!("data dir should not be consulted")
}

// ── take_flag ─────────────────────────────────────────────────

#[test]
fn test_take_flag_removes_pair() {
    let mut a = args(&["tally", "--ledger", "/tmp/x.csv", "summary"]);
    let value = take_flag(&mut a, "--ledger").unwrap();
    assert_eq!(value.as_deref(), Some("/tmp/x.csv"));
    assert_eq!(a, args(&["tally", "summary"]));
}

#[test]
fn test_take_flag_absent() {
    let mut a = args(&["tally", "summary"]);
    assert_eq!(take_flag(&mut a, "--ledger").unwrap(), None);
    assert_eq!(a.len(), 2);
}

#[test]
fn test_take_flag_missing_value() {
    let mut a = args(&["tally", "--ledger"]);
    assert!(take_flag(&mut a, "--ledger").is_err());
}

#[test]
fn test_take_flag_leaves_only_tui_args() {
    let mut a = args(&["tally", "--ledger", "books.csv"]);
    take_flag(&mut a, "--ledger").unwrap();
    assert_eq!(a, args(&["tally"]));
}

// ── resolve ───────────────────────────────────────────────────

#[test]
fn test_flag_wins_over_env() {
    let cfg = Config::resolve(
        Some("/data/flag.csv".into()),
        Some(OsString::from("/data/env.csv")),
        no_data_dir,
    )
    .unwrap();
    assert_eq!(cfg.ledger_path, PathBuf::from("/data/flag.csv"));
    assert_eq!(cfg.log_path, PathBuf::from("/data/tally.log"));
}

#[test]
fn test_env_used_without_flag() {
    let cfg = Config::resolve(None, Some(OsString::from("/srv/env.csv")), no_data_dir).unwrap();
    assert_eq!(cfg.ledger_path, PathBuf::from("/srv/env.csv"));
}

#[test]
fn test_empty_env_falls_back_to_data_dir() {
    let cfg = Config::resolve(None, Some(OsString::new()), || Ok(PathBuf::from("/home/u/.local/share/tally")))
        .unwrap();
    assert_eq!(
        cfg.ledger_path,
        PathBuf::from("/home/u/.local/share/tally/expenses_data.csv")
    );
    assert_eq!(cfg.log_path, PathBuf::from("/home/u/.local/share/tally/tally.log"));
}

#[test]
fn test_bare_file_name_logs_in_cwd() {
    let cfg = Config::resolve(Some("books.csv".into()), None, no_data_dir).unwrap();
    assert_eq!(cfg.ledger_path, PathBuf::from("books.csv"));
    assert_eq!(cfg.log_path, PathBuf::from("./tally.log"));
}

#[test]
fn test_data_dir_error_propagates() {
    assert!(Config::resolve(None, None, no_data_dir).is_err());
}
