use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::quick;
use super::util::format_amount;
use crate::budget;
use crate::models::PeriodKey;
use crate::store::{self, LedgerStore};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &LedgerStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Tally", cmd_quit, r);
    register_command!("quit", "Quit Tally", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("hist", "Go to History", cmd_history, r);
    register_command!("history", "Go to History", cmd_history, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "income",
        "Set monthly income (e.g. :income 2500)",
        cmd_income,
        r
    );
    register_command!("i", "Set monthly income (e.g. :i 2500)", cmd_income, r);
    register_command!(
        "add",
        "Add an expense (e.g. :add Coffee 4.50)",
        cmd_add,
        r
    );
    register_command!("a", "Add an expense (e.g. :a Coffee 4.50)", cmd_add, r);
    register_command!("undo", "Undo the last added expense", cmd_undo, r);
    register_command!(
        "reset",
        "Clear a month's expenses (e.g. :reset 2024-01)",
        cmd_reset,
        r
    );
    register_command!(
        "month",
        "Filter history by month (e.g. :month 2024-01, :month all)",
        cmd_month,
        r
    );
    register_command!("m", "Filter history by month", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "search",
        "Search descriptions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search descriptions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "export",
        "Export the full ledger to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!(
        "quick",
        "Quick amount preset (e.g. :quick 20, :quick off)",
        cmd_quick,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &LedgerStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parse a user-typed amount, tolerating a leading `$` and thousands commas.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).ok()
}

/// Split `:add` arguments into description and typed amount. A trailing
/// token that parses as an amount is the amount; otherwise the amount is
/// zero and the whole input is the description.
pub(crate) fn split_add_args(args: &str) -> (&str, Decimal) {
    let args = args.trim();
    if let Some(amount) = parse_amount(args) {
        return ("", amount);
    }
    match args.rsplit_once(' ') {
        Some((desc, last)) => match parse_amount(last) {
            Some(amount) => (desc.trim_end(), amount),
            None => (args, Decimal::ZERO),
        },
        None => (args, Decimal::ZERO),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard();
    Ok(())
}

fn cmd_history(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::History;
    app.refresh_history();
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app.state.monthly_income();
        app.set_status(format!(
            "Monthly income for {}: {}. Usage: :income <amount>",
            app.current_period(),
            format_amount(current)
        ));
        return Ok(());
    }

    let Some(amount) = parse_amount(args) else {
        app.set_status(format!("Invalid amount: {args}"));
        return Ok(());
    };

    match budget::set_income(&mut app.state, amount) {
        Ok(()) => {
            app.refresh_dashboard();
            app.set_success(format!("Monthly income saved: {}", format_amount(amount)));
        }
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &LedgerStore) -> anyhow::Result<()> {
    let (description, typed) = split_add_args(args);
    let amount = quick::prefill_amount(typed, app.quick_preset);

    match budget::add_expense(&mut app.state, store, description, amount, app.now) {
        Ok(outcome) => {
            app.apply(outcome.ledger);
            let record = outcome.value;
            app.set_success(format!(
                "Added: {} ({})",
                record.description,
                format_amount(record.amount)
            ));
        }
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_undo(_args: &str, app: &mut App, store: &LedgerStore) -> anyhow::Result<()> {
    match budget::undo_last(&mut app.state, store) {
        Ok(outcome) => {
            app.apply(outcome.ledger);
            app.set_success("Last expense undone.");
        }
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_reset(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    let period = if args.is_empty() {
        app.current_period()
    } else {
        match PeriodKey::from_str(args) {
            Ok(p) => p,
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    };

    let count = app.ledger.in_period(period).count();
    app.confirm_message = if period == app.current_period() {
        format!("Clear {count} expense(s) and income for {period}?")
    } else {
        format!("Clear {count} expense(s) for {period}?")
    };
    app.pending_action = Some(PendingAction::ResetPeriod { period, count });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// Run a confirmed reset.
pub(crate) fn confirm_reset(app: &mut App, store: &LedgerStore, period: PeriodKey) {
    match budget::reset_period(&mut app.state, store, period) {
        Ok(outcome) => {
            app.apply(outcome.ledger);
            if period == app.current_period() {
                app.set_success("Monthly data reset (expenses for current month cleared).");
            } else {
                app.set_success(format!("Cleared {} expense(s) for {period}", outcome.value));
            }
        }
        Err(e) => app.report(&e),
    }
}

fn cmd_month(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.history_month = None;
        app.set_status("Showing all months");
    } else {
        // Accept "2024-01" or a bare month number in the current year
        let candidate = if args.len() <= 2 {
            format!("{:04}-{args:0>2}", app.current_period().year())
        } else {
            args.to_string()
        };
        match PeriodKey::from_str(&candidate) {
            Ok(month) => {
                app.history_month = Some(month);
                app.set_status(format!("Switched to month: {month}"));
            }
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    }

    app.screen = Screen::History;
    app.history_cursor.top();
    app.refresh_history();
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.shift_history_month(1);
    if let Some(month) = app.history_month {
        app.set_status(format!("Month: {month}"));
    }
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.shift_history_month(-1);
    if let Some(month) = app.history_month {
        app.set_status(format!("Month: {month}"));
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::History;
    app.history_cursor.top();
    app.refresh_history();

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args} ({} matches)", app.history.len()));
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/tally-export.csv")
    } else {
        crate::run::shellexpand(args)
    };

    match store::export_to_path(&app.ledger, Path::new(&path)) {
        Ok(0) => app.set_status(format!("Exported an empty ledger to {path}")),
        Ok(count) => app.set_success(format!("Exported {count} expenses to {path}")),
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_quick(args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.quick_preset = quick::next_preset(app.quick_preset);
    } else if args.eq_ignore_ascii_case("off") {
        app.quick_preset = None;
    } else {
        let preset = parse_amount(args).and_then(quick::find_preset);
        if preset.is_none() {
            let choices: Vec<String> = quick::QUICK_AMOUNTS.iter().map(|a| a.to_string()).collect();
            app.set_status(format!(
                "Quick amounts: {}, or off",
                choices.join(", ")
            ));
            return Ok(());
        }
        app.quick_preset = preset;
    }
    app.set_status(format!("Quick amount: {}", quick::label(app.quick_preset)));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
