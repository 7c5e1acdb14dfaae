use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::models::{normalize_description, ExpenseRecord, Ledger, PeriodKey, TIMESTAMP_FORMAT};

/// Column order of the ledger file. `Id` trails the four canonical columns
/// and is optional on read, so older four-column files still load.
pub(crate) const HEADER: [&str; 5] = ["Month", "Date", "Description", "Amount", "Id"];

/// Column positions discovered from a file's header row.
struct Columns {
    month: usize,
    date: usize,
    description: usize,
    amount: usize,
    id: Option<usize>,
}

impl Columns {
    fn locate(header: &csv::StringRecord) -> Result<Self, PersistenceError> {
        let names: Vec<&str> = header
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |name: &str| names.iter().position(|h| *h == name);
        let require = |column: &'static str| {
            find(column).ok_or(PersistenceError::MissingColumn { column })
        };

        Ok(Self {
            month: require("Month")?,
            date: require("Date")?,
            description: require("Description")?,
            amount: require("Amount")?,
            id: find("Id"),
        })
    }

    fn parse(&self, row: &csv::StringRecord, line: usize) -> Result<ExpenseRecord, PersistenceError> {
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();
        let malformed = |reason: String| PersistenceError::MalformedRow { row: line, reason };

        let period = PeriodKey::from_str(field(self.month)).map_err(|e| malformed(e.to_string()))?;

        let raw_date = field(self.date);
        let timestamp = NaiveDateTime::parse_from_str(raw_date, TIMESTAMP_FORMAT)
            .map_err(|_| malformed(format!("invalid date '{raw_date}'")))?;

        let raw_amount = field(self.amount);
        let amount = Decimal::from_str(raw_amount)
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .map_err(|_| malformed(format!("invalid amount '{raw_amount}'")))?;
        if amount <= Decimal::ZERO {
            return Err(malformed(format!("amount must be positive, got {amount}")));
        }

        let id = match self.id.map(field).filter(|s| !s.is_empty()) {
            Some(raw) => {
                Uuid::parse_str(raw).map_err(|_| malformed(format!("invalid id '{raw}'")))?
            }
            None => Uuid::new_v4(),
        };

        Ok(ExpenseRecord {
            id,
            period,
            timestamp,
            description: normalize_description(field(self.description)),
            amount,
        })
    }
}

/// Parse a whole ledger file. A missing header or any bad row is an error;
/// blank lines are skipped.
pub(crate) fn read_ledger<R: Read>(reader: R) -> Result<Ledger, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = rdr.records();
    let header = match rows.next() {
        Some(header) => header?,
        None => return Err(PersistenceError::MissingHeader),
    };
    let columns = Columns::locate(&header)?;

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        let row = row?;
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        // Header is line 1.
        records.push(columns.parse(&row, i + 2)?);
    }
    Ok(Ledger::from_records(records))
}

/// Serialize the ledger to CSV bytes, header row first.
pub(crate) fn to_csv_bytes(ledger: &Ledger) -> Result<Vec<u8>, PersistenceError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for record in ledger.records() {
        wtr.write_record([
            record.period.to_string(),
            record.timestamp_label(),
            record.description.clone(),
            record.amount.to_string(),
            record.id.to_string(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| PersistenceError::Io(e.into_error()))
}

#[cfg(test)]
#[path = "csv_format_tests.rs"]
mod tests;
