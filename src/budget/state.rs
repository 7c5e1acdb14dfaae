use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::current_period;
use crate::error::{LedgerError, Result};
use crate::models::{ExpenseRecord, PeriodKey};

/// The most recent mutation that undo cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LastAction {
    Add(ExpenseRecord),
    Undo(ExpenseRecord),
}

/// Per-session budget values. Never persisted: a new session, or a new
/// month, starts with zero income.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetState {
    current_period: PeriodKey,
    monthly_income: Decimal,
    last_action: Option<LastAction>,
}

impl BudgetState {
    pub(crate) fn new(now: NaiveDateTime) -> Self {
        Self::for_period(current_period(now))
    }

    pub(crate) fn for_period(period: PeriodKey) -> Self {
        Self {
            current_period: period,
            monthly_income: Decimal::ZERO,
            last_action: None,
        }
    }

    pub(crate) fn current_period(&self) -> PeriodKey {
        self.current_period
    }

    pub(crate) fn monthly_income(&self) -> Decimal {
        self.monthly_income
    }

    pub(crate) fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    pub(crate) fn income_is_set(&self) -> bool {
        self.monthly_income > Decimal::ZERO
    }

    /// The record a call to undo would remove, if any.
    pub(crate) fn undo_candidate(&self) -> Option<&ExpenseRecord> {
        match &self.last_action {
            Some(LastAction::Add(r)) => Some(r),
            _ => None,
        }
    }

    pub(crate) fn set_income(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.monthly_income = amount;
        Ok(())
    }

    /// Switch to `period` with a clean slate. Returns the previous period.
    pub(crate) fn begin_period(&mut self, period: PeriodKey) -> PeriodKey {
        let previous = self.current_period;
        self.current_period = period;
        self.monthly_income = Decimal::ZERO;
        self.last_action = None;
        previous
    }

    pub(super) fn record_add(&mut self, record: ExpenseRecord) {
        self.last_action = Some(LastAction::Add(record));
    }

    pub(super) fn record_undo(&mut self, record: ExpenseRecord) {
        self.last_action = Some(LastAction::Undo(record));
    }

    pub(super) fn clear_income(&mut self) {
        self.monthly_income = Decimal::ZERO;
    }

    pub(super) fn forget_last_action(&mut self) {
        self.last_action = None;
    }
}
