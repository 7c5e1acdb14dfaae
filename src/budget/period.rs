use chrono::{Local, NaiveDateTime};
use tracing::info;

use super::BudgetState;
use crate::models::PeriodKey;

/// The local wall clock. Everything else takes time as a parameter.
pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn current_period(now: NaiveDateTime) -> PeriodKey {
    PeriodKey::of(&now)
}

pub(crate) fn has_rolled_over(active: PeriodKey, now: NaiveDateTime) -> bool {
    current_period(now) != active
}

/// A detected month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rollover {
    pub(crate) from: PeriodKey,
    pub(crate) to: PeriodKey,
}

impl Rollover {
    pub(crate) fn notice(&self) -> String {
        format!("New month detected ({}), income reset for the month.", self.to)
    }
}

/// Move the session to the wall-clock month if it has changed. Income is
/// zeroed and undo forgotten; stored expenses are untouched.
pub(crate) fn roll_if_needed(state: &mut BudgetState, now: NaiveDateTime) -> Option<Rollover> {
    if !has_rolled_over(state.current_period(), now) {
        return None;
    }
    let to = current_period(now);
    let from = state.begin_period(to);
    info!(%from, %to, "Month rolled over, income reset");
    Some(Rollover { from, to })
}
