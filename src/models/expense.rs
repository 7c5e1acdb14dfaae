use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::PeriodKey;

pub(crate) const PLACEHOLDER_DESCRIPTION: &str = "No description";

/// Local date-time layout used in the ledger file and on screen.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseRecord {
    pub(crate) id: Uuid,
    pub(crate) period: PeriodKey,
    /// Local wall-clock time, whole seconds.
    pub(crate) timestamp: NaiveDateTime,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
}

impl ExpenseRecord {
    pub(crate) fn new(
        period: PeriodKey,
        timestamp: NaiveDateTime,
        description: &str,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            description: normalize_description(description),
            amount,
        }
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub(crate) fn timestamp_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Case-insensitive substring match on the description.
    /// `needle` must already be lowercase.
    pub(crate) fn description_contains(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
    }
}

/// Trim a user-entered description, falling back to the placeholder.
pub(crate) fn normalize_description(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_DESCRIPTION.to_string()
    } else {
        trimmed.to_string()
    }
}
