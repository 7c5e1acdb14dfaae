//! Derived views over the ledger. Nothing here touches the store or the
//! session state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{ExpenseRecord, Ledger, PeriodKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) spent: Decimal,
    /// `income - spent`. Goes negative when overspent.
    pub(crate) remaining: Decimal,
}

impl Totals {
    pub(crate) fn is_overspent(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

pub(crate) fn totals_for(ledger: &Ledger, period: PeriodKey, income: Decimal) -> Totals {
    let spent = ledger.in_period(period).map(|r| r.amount).sum();
    Totals {
        income,
        spent,
        remaining: income - spent,
    }
}

/// Daily spending in `period`, one entry per calendar date with spending,
/// ascending by date.
pub(crate) fn trend(ledger: &Ledger, period: PeriodKey) -> Vec<(NaiveDate, Decimal)> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in ledger.in_period(period) {
        *by_day.entry(record.date()).or_default() += record.amount;
    }
    by_day.into_iter().collect()
}

/// Records matching an optional exact period and an optional
/// case-insensitive description substring, in ledger order. An empty text
/// filter matches everything.
pub(crate) fn filter<'a>(
    ledger: &'a Ledger,
    period: Option<PeriodKey>,
    text: Option<&str>,
) -> Vec<&'a ExpenseRecord> {
    let needle = text.filter(|t| !t.is_empty()).map(str::to_lowercase);
    ledger
        .iter()
        .filter(|r| period.map_or(true, |p| r.period == p))
        .filter(|r| needle.as_deref().map_or(true, |n| r.description_contains(n)))
        .collect()
}

/// Every period that has records, plus `current`, oldest first.
pub(crate) fn periods(ledger: &Ledger, current: PeriodKey) -> Vec<PeriodKey> {
    let mut set: BTreeSet<PeriodKey> = ledger.iter().map(|r| r.period).collect();
    set.insert(current);
    set.into_iter().collect()
}
