//! Session-side bookkeeping: which month is active, the income entered for
//! it, the single level of undo, and the mutations that keep those in step
//! with the stored ledger.

mod ops;
mod period;
mod state;

pub(crate) use ops::{add_expense, reset_period, set_income, undo_last};
pub(crate) use period::{current_period, local_now, roll_if_needed};
pub(crate) use state::{BudgetState, LastAction};
