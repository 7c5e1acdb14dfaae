use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::error;

use super::util::ListCursor;
use crate::budget::{self, BudgetState};
use crate::error::LedgerError;
use crate::models::{ExpenseRecord, Ledger, PeriodKey};
use crate::report::{self, Totals};
use crate::store::LedgerStore;

/// Dashboard list length for the active month.
const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    History,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::History]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::History => write!(f, "History"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    ResetPeriod { period: PeriodKey, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) status_level: StatusLevel,
    pub(crate) show_help: bool,

    // Session
    /// Wall clock as of the last handled key.
    pub(crate) now: NaiveDateTime,
    pub(crate) state: BudgetState,
    pub(crate) ledger: Ledger,
    pub(crate) quick_preset: Option<usize>,

    // Dashboard
    pub(crate) totals: Totals,
    pub(crate) trend: Vec<(NaiveDate, Decimal)>,
    pub(crate) recent: Vec<ExpenseRecord>,

    // History
    pub(crate) history: Vec<ExpenseRecord>,
    pub(crate) history_month: Option<PeriodKey>,
    pub(crate) history_cursor: ListCursor,
    pub(crate) months: Vec<PeriodKey>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(now: NaiveDateTime) -> Self {
        let state = BudgetState::new(now);
        let current = state.current_period();

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            status_level: StatusLevel::Info,
            show_help: false,

            totals: report::totals_for(&Ledger::new(), current, Decimal::ZERO),
            now,
            state,
            ledger: Ledger::new(),
            quick_preset: None,

            trend: Vec::new(),
            recent: Vec::new(),

            history: Vec::new(),
            history_month: Some(current),
            history_cursor: ListCursor::default(),
            months: vec![current],

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn current_period(&self) -> PeriodKey {
        self.state.current_period()
    }

    /// Re-read the ledger from the store and recompute every view.
    pub(crate) fn reload(&mut self, store: &LedgerStore) -> Result<(), LedgerError> {
        self.ledger = store.load()?;
        self.refresh();
        Ok(())
    }

    /// Adopt a ledger returned by a successful mutation.
    pub(crate) fn apply(&mut self, ledger: Ledger) {
        self.ledger = ledger;
        self.refresh();
    }

    pub(crate) fn refresh(&mut self) {
        self.refresh_dashboard();
        self.refresh_history();
    }

    pub(crate) fn refresh_dashboard(&mut self) {
        let current = self.current_period();
        self.totals = report::totals_for(&self.ledger, current, self.state.monthly_income());
        self.trend = report::trend(&self.ledger, current);
        self.recent = self
            .ledger
            .in_period(current)
            .rev()
            .take(RECENT_LIMIT)
            .cloned()
            .collect();
    }

    pub(crate) fn refresh_history(&mut self) {
        let text = Some(self.search_input.as_str());
        self.history = report::filter(&self.ledger, self.history_month, text)
            .into_iter()
            .cloned()
            .collect();
        self.months = report::periods(&self.ledger, self.current_period());
        self.history_cursor.clamp(self.history.len());
    }

    /// Apply month rollover before handling input. Returns true when the
    /// month changed.
    pub(crate) fn tick(&mut self, now: NaiveDateTime) -> bool {
        self.now = now;
        let previous = self.current_period();
        let Some(rollover) = budget::roll_if_needed(&mut self.state, now) else {
            return false;
        };
        if self.history_month == Some(previous) {
            self.history_month = Some(rollover.to);
        }
        self.refresh();
        self.set_status_level(rollover.notice(), StatusLevel::Warning);
        true
    }

    /// Surface a core error in the status line.
    pub(crate) fn report(&mut self, err: &LedgerError) {
        let level = if err.is_warning() {
            StatusLevel::Warning
        } else {
            if !err.is_validation() {
                error!(error = %err, "Ledger operation failed");
            }
            StatusLevel::Error
        };
        self.set_status_level(err.to_string(), level);
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.set_status_level(msg, StatusLevel::Info);
    }

    pub(crate) fn set_success(&mut self, msg: impl Into<String>) {
        self.set_status_level(msg, StatusLevel::Success);
    }

    pub(crate) fn set_status_level(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.status_message = msg.into();
        self.status_level = level;
    }

    /// Step the history month filter by `delta` months, starting from the
    /// current period when showing all months.
    pub(crate) fn shift_history_month(&mut self, delta: i32) {
        let mut month = self.history_month.unwrap_or_else(|| self.current_period());
        for _ in 0..delta.unsigned_abs() {
            month = if delta > 0 { month.next() } else { month.prev() };
        }
        self.history_month = Some(month);
        self.history_cursor.top();
        self.refresh_history();
    }

    pub(crate) fn history_total(&self) -> Decimal {
        self.history.iter().map(|r| r.amount).sum()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
