use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{BudgetState, LastAction};
use crate::error::{LedgerError, Result};
use crate::models::{ExpenseRecord, Ledger, PeriodKey};
use crate::store::LedgerStore;

/// Result of a ledger mutation: the ledger as saved, plus what changed.
#[derive(Debug)]
pub(crate) struct Outcome<T> {
    pub(crate) ledger: Ledger,
    pub(crate) value: T,
}

pub(crate) fn set_income(state: &mut BudgetState, amount: Decimal) -> Result<()> {
    state.set_income(amount).inspect_err(|_| {
        debug!(%amount, "Rejected negative income");
    })?;
    info!(period = %state.current_period(), %amount, "Monthly income set");
    Ok(())
}

/// Record an expense in the active period and persist it.
///
/// Requires income to be set and `amount > 0`. State changes only after the
/// ledger is saved.
pub(crate) fn add_expense(
    state: &mut BudgetState,
    store: &LedgerStore,
    description: &str,
    amount: Decimal,
    now: NaiveDateTime,
) -> Result<Outcome<ExpenseRecord>> {
    if !state.income_is_set() {
        debug!("Rejected add: income not set");
        return Err(LedgerError::IncomeNotSet);
    }
    if amount <= Decimal::ZERO {
        debug!(%amount, "Rejected add: non-positive amount");
        return Err(LedgerError::InvalidAmount(amount));
    }

    let record = ExpenseRecord::new(state.current_period(), now, description, amount);
    let (ledger, ()) = store.update(|ledger| {
        ledger.push(record.clone());
        Ok(())
    })?;

    info!(
        id = %record.id,
        period = %record.period,
        amount = %record.amount,
        description = %record.description,
        "Added expense"
    );
    state.record_add(record.clone());
    Ok(Outcome {
        ledger,
        value: record,
    })
}

/// Remove the record added by the most recent add, once.
pub(crate) fn undo_last(
    state: &mut BudgetState,
    store: &LedgerStore,
) -> Result<Outcome<ExpenseRecord>> {
    let Some(record) = state.undo_candidate().cloned() else {
        debug!(last_action = ?state.last_action().map(kind), "Nothing to undo");
        return Err(LedgerError::NothingToUndo);
    };

    let removal = store.update(|ledger| {
        ledger.remove(record.id).ok_or(LedgerError::NothingToUndo)
    });
    let (ledger, removed) = match removal {
        Ok(done) => done,
        Err(LedgerError::NothingToUndo) => {
            debug!(id = %record.id, "Undo target is no longer stored");
            state.forget_last_action();
            return Err(LedgerError::NothingToUndo);
        }
        Err(e) => return Err(e),
    };

    info!(id = %removed.id, amount = %removed.amount, "Undid last expense");
    state.record_undo(record);
    Ok(Outcome {
        ledger,
        value: removed,
    })
}

/// Delete every record in `period`. Zeroes income when `period` is the
/// active one. Returns the number of records removed.
pub(crate) fn reset_period(
    state: &mut BudgetState,
    store: &LedgerStore,
    period: PeriodKey,
) -> Result<Outcome<usize>> {
    let (ledger, removed) = store.update(|ledger| Ok(ledger.remove_period(period)))?;

    if period == state.current_period() {
        state.clear_income();
    }
    if state.undo_candidate().is_some_and(|r| r.period == period) {
        state.forget_last_action();
    }

    info!(%period, removed, "Reset period");
    Ok(Outcome {
        ledger,
        value: removed,
    })
}

fn kind(action: &LastAction) -> &'static str {
    match action {
        LastAction::Add(_) => "add",
        LastAction::Undo(_) => "undo",
    }
}
