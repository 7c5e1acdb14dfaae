#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use super::*;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
}

fn period(s: &str) -> PeriodKey {
    s.parse().unwrap()
}

// ── PeriodKey ─────────────────────────────────────────────────

#[test]
fn test_period_parse_and_display() {
    let p = period("2025-01");
    assert_eq!(p.year(), 2025);
    assert_eq!(p.to_string(), "2025-01");
}

#[test]
fn test_period_parse_rejects_bad_shapes() {
    for bad in ["", "2025", "2025-1", "25-01", "2025-13", "2025-00", "2025/01", "abcd-ef", "2025-01-15"] {
        assert!(bad.parse::<PeriodKey>().is_err(), "accepted {bad:?}");
    }
}

#[test]
fn test_period_parse_error_message() {
    let err = "2025-1".parse::<PeriodKey>().unwrap_err();
    assert_eq!(err.to_string(), "Invalid month '2025-1'. Use YYYY-MM (e.g. 2024-01)");
}

#[test]
fn test_period_of_datetime() {
    assert_eq!(PeriodKey::of(&at("2024-12-31 23:59:59")), period("2024-12"));
    assert_eq!(PeriodKey::of(&at("2025-01-01 00:00:00")), period("2025-01"));
}

#[test]
fn test_period_ordering_matches_string_ordering() {
    let mut keys = vec![period("2025-02"), period("2024-12"), period("2025-10"), period("2025-01")];
    let mut labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    keys.sort();
    labels.sort();
    let sorted: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    assert_eq!(sorted, labels);
}

#[test]
fn test_period_next_and_prev_cross_years() {
    assert_eq!(period("2024-12").next(), period("2025-01"));
    assert_eq!(period("2025-01").prev(), period("2024-12"));
    assert_eq!(period("2025-06").next().prev(), period("2025-06"));
}

#[test]
fn test_period_of_date() {
    assert_eq!(PeriodKey::of(&NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()), period("2025-02"));
    assert_eq!(PeriodKey::of(&NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()), period("2025-03"));
}

// ── ExpenseRecord ─────────────────────────────────────────────

#[test]
fn test_record_trims_description() {
    let r = ExpenseRecord::new(period("2025-01"), at("2025-01-05 09:00:00"), "  Coffee ", dec!(4.50));
    assert_eq!(r.description, "Coffee");
}

#[test]
fn test_record_blank_description_gets_placeholder() {
    let r = ExpenseRecord::new(period("2025-01"), at("2025-01-05 09:00:00"), "   ", dec!(1));
    assert_eq!(r.description, PLACEHOLDER_DESCRIPTION);
}

#[test]
fn test_record_timestamp_truncated_to_seconds() {
    let precise = at("2025-01-05 09:00:07") + chrono::Duration::milliseconds(750);
    let r = ExpenseRecord::new(period("2025-01"), precise, "Tea", dec!(2));
    assert_eq!(r.timestamp_label(), "2025-01-05 09:00:07");
    assert_eq!(r.timestamp, at("2025-01-05 09:00:07"));
}

#[test]
fn test_records_with_same_fields_have_distinct_ids() {
    let ts = at("2025-01-05 09:00:00");
    let a = ExpenseRecord::new(period("2025-01"), ts, "Coffee", dec!(3));
    let b = ExpenseRecord::new(period("2025-01"), ts, "Coffee", dec!(3));
    assert_ne!(a.id, b.id);
    assert_ne!(a, b);
}

#[test]
fn test_description_contains_is_case_insensitive() {
    let r = ExpenseRecord::new(period("2025-01"), at("2025-01-05 09:00:00"), "Whole Foods", dec!(30));
    assert!(r.description_contains("foods"));
    assert!(r.description_contains("whole f"));
    assert!(!r.description_contains("market"));
}

// ── Ledger ────────────────────────────────────────────────────

#[test]
fn test_ledger_remove_by_id_leaves_twins() {
    let ts = at("2025-01-05 09:00:00");
    let a = ExpenseRecord::new(period("2025-01"), ts, "Coffee", dec!(3));
    let b = ExpenseRecord::new(period("2025-01"), ts, "Coffee", dec!(3));
    let mut ledger = Ledger::from_records(vec![a.clone(), b.clone()]);

    assert_eq!(ledger.remove(b.id), Some(b.clone()));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records(), std::slice::from_ref(&a));
    assert_eq!(ledger.remove(b.id), None);
}

#[test]
fn test_ledger_remove_period() {
    let mut ledger = Ledger::new();
    ledger.push(ExpenseRecord::new(period("2025-01"), at("2025-01-02 10:00:00"), "A", dec!(1)));
    ledger.push(ExpenseRecord::new(period("2025-02"), at("2025-02-02 10:00:00"), "B", dec!(2)));
    ledger.push(ExpenseRecord::new(period("2025-01"), at("2025-01-03 10:00:00"), "C", dec!(3)));

    assert_eq!(ledger.remove_period(period("2025-01")), 2);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].description, "B");
    assert_eq!(ledger.remove_period(period("2025-01")), 0);
}

#[test]
fn test_ledger_in_period_preserves_order() {
    let mut ledger = Ledger::new();
    ledger.push(ExpenseRecord::new(period("2025-01"), at("2025-01-09 10:00:00"), "Late", dec!(1)));
    ledger.push(ExpenseRecord::new(period("2025-02"), at("2025-02-01 10:00:00"), "Other", dec!(1)));
    ledger.push(ExpenseRecord::new(period("2025-01"), at("2025-01-01 10:00:00"), "Early", dec!(1)));

    let names: Vec<&str> = ledger
        .in_period(period("2025-01"))
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(names, ["Late", "Early"]);
}
