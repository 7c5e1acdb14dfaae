#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
}

fn record(month: &str, when: &str, desc: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord::new(month.parse().unwrap(), ts(when), desc, amount)
}

fn read_str(content: &str) -> Result<Ledger, PersistenceError> {
    read_ledger(content.as_bytes())
}

// ── writing ───────────────────────────────────────────────────

#[test]
fn test_header_written_for_empty_ledger() {
    let bytes = to_csv_bytes(&Ledger::new()).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "Month,Date,Description,Amount,Id\n");
}

#[test]
fn test_row_layout() {
    let r = record("2025-01", "2025-01-05 09:30:00", "Coffee", dec!(4.50));
    let ledger = Ledger::from_records(vec![r.clone()]);
    let text = String::from_utf8(to_csv_bytes(&ledger).unwrap()).unwrap();
    let row = text.lines().nth(1).unwrap();
    assert_eq!(row, format!("2025-01,2025-01-05 09:30:00,Coffee,4.50,{}", r.id));
}

#[test]
fn test_descriptions_with_commas_and_quotes_are_quoted() {
    let r = record("2025-01", "2025-01-05 09:30:00", "Dinner, \"fancy\"", dec!(80));
    let ledger = Ledger::from_records(vec![r]);
    let bytes = to_csv_bytes(&ledger).unwrap();
    let back = read_ledger(bytes.as_slice()).unwrap();
    assert_eq!(back.records()[0].description, "Dinner, \"fancy\"");
}

#[test]
fn test_roundtrip_preserves_records_and_order() {
    let ledger = Ledger::from_records(vec![
        record("2025-01", "2025-01-05 09:30:00", "Groceries", dec!(60)),
        record("2025-02", "2025-02-01 18:00:00", "Transport", dec!(15.25)),
        record("2025-01", "2025-01-06 07:15:42", "Coffee", dec!(0.1)),
    ]);
    let bytes = to_csv_bytes(&ledger).unwrap();
    assert_eq!(read_ledger(bytes.as_slice()).unwrap(), ledger);
}

#[test]
fn test_repeated_roundtrips_do_not_drift() {
    let mut ledger = Ledger::new();
    for _ in 0..10 {
        ledger.push(record("2025-01", "2025-01-05 09:30:00", "Dime", dec!(0.10)));
    }
    let mut current = ledger.clone();
    for _ in 0..5 {
        let bytes = to_csv_bytes(&current).unwrap();
        current = read_ledger(bytes.as_slice()).unwrap();
    }
    let total: Decimal = current.iter().map(|r| r.amount).sum();
    assert_eq!(total, dec!(1.00));
    assert_eq!(current, ledger);
}

// ── reading ───────────────────────────────────────────────────

#[test]
fn test_reads_legacy_four_column_file() {
    let ledger = read_str(
        "Month,Date,Description,Amount\n\
         2025-01,2025-01-05 09:30:00,Coffee,4.5\n\
         2025-01,2025-01-05 09:30:00,Coffee,4.5\n",
    )
    .unwrap();
    assert_eq!(ledger.len(), 2);
    let r = &ledger.records()[0];
    assert_eq!(r.period.to_string(), "2025-01");
    assert_eq!(r.amount, dec!(4.5));
    // Fresh ids keep identical legacy rows apart.
    assert_ne!(ledger.records()[0].id, ledger.records()[1].id);
}

#[test]
fn test_reads_float_style_amounts() {
    let ledger = read_str(
        "Month,Date,Description,Amount\n\
         2025-01,2025-01-05 09:30:00,Rent,1000.0\n\
         2025-01,2025-01-06 09:30:00,Gum,1e-01\n",
    )
    .unwrap();
    assert_eq!(ledger.records()[0].amount, dec!(1000));
    assert_eq!(ledger.records()[1].amount, dec!(0.1));
}

#[test]
fn test_columns_located_by_name() {
    let ledger = read_str(
        "Amount,Description,Date,Month\n\
         12.00,Lunch,2025-03-10 12:00:00,2025-03\n",
    )
    .unwrap();
    let r = &ledger.records()[0];
    assert_eq!(r.description, "Lunch");
    assert_eq!(r.period.to_string(), "2025-03");
}

#[test]
fn test_blank_description_becomes_placeholder() {
    let ledger = read_str("Month,Date,Description,Amount\n2025-01,2025-01-05 09:30:00,,3\n").unwrap();
    assert_eq!(ledger.records()[0].description, crate::models::PLACEHOLDER_DESCRIPTION);
}

#[test]
fn test_blank_lines_skipped() {
    let ledger = read_str("Month,Date,Description,Amount\n\n2025-01,2025-01-05 09:30:00,Tea,3\n,,,\n").unwrap();
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_header_only_is_empty_ledger() {
    let ledger = read_str("Month,Date,Description,Amount,Id\n").unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_empty_input_is_missing_header() {
    assert!(matches!(read_str(""), Err(PersistenceError::MissingHeader)));
}

#[test]
fn test_missing_column_reported() {
    let err = read_str("Month,Date,Description\n2025-01,2025-01-05 09:30:00,Tea\n").unwrap_err();
    assert!(matches!(err, PersistenceError::MissingColumn { column: "Amount" }));
}

#[test]
fn test_malformed_amount_reports_row() {
    let err = read_str(
        "Month,Date,Description,Amount\n\
         2025-01,2025-01-05 09:30:00,Tea,3\n\
         2025-01,2025-01-05 09:31:00,Cake,lots\n",
    )
    .unwrap_err();
    match err {
        PersistenceError::MalformedRow { row, reason } => {
            assert_eq!(row, 3);
            assert!(reason.contains("lots"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_positive_amount_rejected() {
    let err = read_str("Month,Date,Description,Amount\n2025-01,2025-01-05 09:30:00,Refund,-3\n").unwrap_err();
    assert!(matches!(err, PersistenceError::MalformedRow { row: 2, .. }));
    let err = read_str("Month,Date,Description,Amount\n2025-01,2025-01-05 09:30:00,Free,0\n").unwrap_err();
    assert!(matches!(err, PersistenceError::MalformedRow { row: 2, .. }));
}

#[test]
fn test_malformed_month_and_date_rejected() {
    assert!(read_str("Month,Date,Description,Amount\nJanuary,2025-01-05 09:30:00,Tea,3\n").is_err());
    assert!(read_str("Month,Date,Description,Amount\n2025-01,05/01/2025,Tea,3\n").is_err());
}

#[test]
fn test_malformed_id_rejected() {
    let err = read_str("Month,Date,Description,Amount,Id\n2025-01,2025-01-05 09:30:00,Tea,3,not-a-uuid\n")
        .unwrap_err();
    assert!(matches!(err, PersistenceError::MalformedRow { row: 2, .. }));
}

#[test]
fn test_byte_order_mark_tolerated() {
    let ledger = read_str("\u{feff}Month,Date,Description,Amount\n2025-01,2025-01-05 09:30:00,Tea,3\n").unwrap();
    assert_eq!(ledger.len(), 1);
}
