#![allow(clippy::unwrap_used)]

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{ExpenseRecord, TIMESTAMP_FORMAT};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn period(s: &str) -> PeriodKey {
    s.parse().unwrap()
}

fn rec(month: &str, ts: &str, desc: &str, amount: Decimal) -> ExpenseRecord {
    let ts = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap();
    ExpenseRecord::new(period(month), ts, desc, amount)
}

fn sample() -> Ledger {
    Ledger::from_records(vec![
        rec("2025-01", "2025-01-03 09:00:00", "Groceries", dec!(60)),
        rec("2025-01", "2025-01-04 10:00:00", "Transport", dec!(15)),
        rec("2025-02", "2025-02-01 08:00:00", "Rent", dec!(700)),
    ])
}

fn output(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
    let mut buf = Vec::new();
    write(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// ── Argument helpers ──────────────────────────────────────────

#[test]
fn test_flag_value() {
    let a = args(&["--month", "2025-01", "--search", "coffee"]);
    assert_eq!(flag_value(&a, "--month"), Some("2025-01"));
    assert_eq!(flag_value(&a, "--search"), Some("coffee"));
    assert_eq!(flag_value(&a, "--income"), None);
}

#[test]
fn test_positional_skips_flags_and_values() {
    assert_eq!(positional(&args(&["--income", "900", "2025-01"])), Some("2025-01"));
    assert_eq!(positional(&args(&["--yes", "2024-12"])), Some("2024-12"));
    assert_eq!(positional(&args(&["--income", "900"])), None);
    assert_eq!(positional(&args(&["-"])), Some("-"));
}

#[test]
fn test_period_arg_rejects_bad_month() {
    assert!(period_arg(Some("2025-1")).is_err());
    assert_eq!(period_arg(Some("2025-01")).unwrap(), period("2025-01"));
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
}

// ── Output ────────────────────────────────────────────────────

#[test]
fn test_summary_output() {
    let text = output(|out| write_summary(out, &sample(), period("2025-01"), dec!(1000)));
    assert!(text.starts_with("Tally 2025-01\n"));
    assert!(text.contains("$1,000.00"));
    assert!(text.contains("$75.00"));
    assert!(text.contains("$925.00"));
    assert!(!text.contains("Over budget"));
}

#[test]
fn test_summary_overspent() {
    let text = output(|out| write_summary(out, &sample(), period("2025-02"), dec!(500)));
    assert!(text.contains("-$200.00"));
    assert!(text.contains("Over budget by $200.00"));
}

#[test]
fn test_history_output_filters() {
    let text = output(|out| write_history(out, &sample(), Some(period("2025-01")), None));
    assert!(text.contains("Groceries"));
    assert!(text.contains("Transport"));
    assert!(!text.contains("Rent"));
    assert!(text.contains("2 expense(s), total $75.00"));

    let text = output(|out| write_history(out, &sample(), None, Some("RENT")));
    assert!(text.contains("1 expense(s), total $700.00"));
}

#[test]
fn test_history_output_empty() {
    let text = output(|out| write_history(out, &Ledger::new(), None, None));
    assert_eq!(text, "No expenses found\n");
}

// ── Commands against a store ──────────────────────────────────

#[test]
fn test_export_to_stdout_matches_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(dir.path().join("expenses_data.csv"));
    store.save(&sample()).unwrap();

    let mut buf = Vec::new();
    cli_export(&args(&["-"]), &store, &mut buf).unwrap();
    assert_eq!(buf, std::fs::read(store.path()).unwrap());
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(dir.path().join("expenses_data.csv"));
    store.save(&sample()).unwrap();
    let target = dir.path().join("copy.csv");

    let mut buf = Vec::new();
    cli_export(&args(&[target.to_str().unwrap()]), &store, &mut buf).unwrap();
    assert!(String::from_utf8(buf).unwrap().starts_with("Exported 3 expense(s)"));
    assert_eq!(std::fs::read(&target).unwrap(), std::fs::read(store.path()).unwrap());
}

#[test]
fn test_reset_requires_yes() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(dir.path().join("expenses_data.csv"));
    store.save(&sample()).unwrap();

    let mut buf = Vec::new();
    let err = cli_reset(&args(&["2025-01"]), &store, &mut buf).unwrap_err();
    assert!(err.to_string().contains("--yes"));
    assert_eq!(store.load().unwrap().len(), 3);

    cli_reset(&args(&["2025-01", "--yes"]), &store, &mut buf).unwrap();
    let left = store.load().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left.records()[0].description, "Rent");
    assert!(String::from_utf8(buf).unwrap().contains("Cleared 2 expense(s) for 2025-01"));
}

#[test]
fn test_summary_rejects_negative_income() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::open(dir.path().join("expenses_data.csv"));
    let mut buf = Vec::new();
    assert!(cli_summary(&args(&["2025-01", "--income", "-5"]), &store, &mut buf).is_err());
    assert!(cli_summary(&args(&["2025-01", "--income", "abc"]), &store, &mut buf).is_err());
}
