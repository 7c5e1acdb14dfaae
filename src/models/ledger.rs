use uuid::Uuid;

use super::{ExpenseRecord, PeriodKey};

/// Every expense across all periods, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub(crate) fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    pub(crate) fn in_period(
        &self,
        period: PeriodKey,
    ) -> impl DoubleEndedIterator<Item = &ExpenseRecord> {
        self.records.iter().filter(move |r| r.period == period)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    pub(crate) fn remove(&mut self, id: Uuid) -> Option<ExpenseRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Drop every record in `period`, returning how many were removed.
    pub(crate) fn remove_period(&mut self, period: PeriodKey) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.period != period);
        before - self.records.len()
    }
}
