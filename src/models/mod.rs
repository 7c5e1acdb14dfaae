mod expense;
mod ledger;
mod period;

pub(crate) use expense::{normalize_description, ExpenseRecord, TIMESTAMP_FORMAT};
#[cfg(test)]
pub(crate) use expense::PLACEHOLDER_DESCRIPTION;
pub(crate) use ledger::Ledger;
pub(crate) use period::PeriodKey;

#[cfg(test)]
mod tests;
