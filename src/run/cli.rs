use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use super::shellexpand;
use crate::budget::{self, local_now, BudgetState};
use crate::models::{Ledger, PeriodKey};
use crate::report;
use crate::store::{self, LedgerStore};
use crate::ui::util::{format_amount, truncate};

pub(crate) fn as_cli(args: &[String], store: &LedgerStore) -> Result<()> {
    let rest = &args[2..];
    let mut out = io::stdout().lock();
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, store, &mut out),
        "history" | "hist" => cli_history(rest, store, &mut out),
        "trend" => cli_trend(rest, store, &mut out),
        "months" => cli_months(store, &mut out),
        "export" => cli_export(rest, store, &mut out),
        "reset" => cli_reset(rest, store, &mut out),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Tally: monthly income and expense tracker");
    println!();
    println!("Usage: tally [--ledger <file.csv>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Income, spent and remaining for a month");
    println!("    --income <amount>           Income to measure against (default: 0)");
    println!("  history                       List expenses");
    println!("    --month <YYYY-MM|all>       Month to list (default: current)");
    println!("    --search <text>             Only descriptions containing text");
    println!("  trend [YYYY-MM]               Daily spending for a month");
    println!("  months                        Months that have expenses");
    println!("  export [path|-]               Export the full ledger as CSV");
    println!("  reset [YYYY-MM] --yes         Delete every expense in a month");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  TALLY_LEDGER                  Ledger file (overridden by --ledger)");
    println!("  TALLY_LOG                     Log filter, e.g. tally=debug");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// The first argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            if !is_switch(arg) {
                iter.next();
            }
            continue;
        }
        return Some(arg.as_str());
    }
    None
}

fn is_switch(flag: &str) -> bool {
    matches!(flag, "--yes")
}

fn period_arg(arg: Option<&str>) -> Result<PeriodKey> {
    match arg {
        Some(s) => Ok(PeriodKey::from_str(s)?),
        None => Ok(budget::current_period(local_now())),
    }
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let period = period_arg(positional(args))?;
    let income = match flag_value(args, "--income") {
        Some(raw) => Decimal::from_str(raw.trim_start_matches('$'))
            .with_context(|| format!("Invalid income: {raw}"))?,
        None => Decimal::ZERO,
    };
    if income < Decimal::ZERO {
        anyhow::bail!("Income cannot be negative");
    }
    let ledger = store.load()?;
    write_summary(out, &ledger, period, income)
}

pub(crate) fn write_summary(
    out: &mut impl Write,
    ledger: &Ledger,
    period: PeriodKey,
    income: Decimal,
) -> Result<()> {
    let totals = report::totals_for(ledger, period, income);
    let count = ledger.in_period(period).count();

    writeln!(out, "Tally {period}")?;
    writeln!(out, "{}", "─".repeat(32))?;
    writeln!(out, "  Income:     {:>16}", format_amount(totals.income))?;
    writeln!(out, "  Spent:      {:>16}", format_amount(totals.spent))?;
    writeln!(out, "  Remaining:  {:>16}", format_amount(totals.remaining))?;
    writeln!(out, "  Expenses:   {count:>16}")?;
    if totals.is_overspent() {
        writeln!(out)?;
        writeln!(out, "  Over budget by {}", format_amount(-totals.remaining))?;
    }
    Ok(())
}

fn cli_history(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let month = match flag_value(args, "--month") {
        Some("all") => None,
        other => Some(period_arg(other)?),
    };
    let search = flag_value(args, "--search");
    let ledger = store.load()?;
    write_history(out, &ledger, month, search)
}

pub(crate) fn write_history(
    out: &mut impl Write,
    ledger: &Ledger,
    month: Option<PeriodKey>,
    search: Option<&str>,
) -> Result<()> {
    let records = report::filter(ledger, month, search);
    if records.is_empty() {
        writeln!(out, "No expenses found")?;
        return Ok(());
    }

    writeln!(out, "{:<20} {:<8} {:<32} {:>12}", "Date", "Month", "Description", "Amount")?;
    writeln!(out, "{}", "─".repeat(75))?;
    let mut total = Decimal::ZERO;
    for r in &records {
        total += r.amount;
        writeln!(
            out,
            "{:<20} {:<8} {:<32} {:>12}",
            r.timestamp_label(),
            r.period.to_string(),
            truncate(&r.description, 32),
            format_amount(r.amount)
        )?;
    }
    writeln!(out, "{}", "─".repeat(75))?;
    writeln!(out, "{} expense(s), total {}", records.len(), format_amount(total))?;
    Ok(())
}

fn cli_trend(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let period = period_arg(positional(args))?;
    let ledger = store.load()?;
    let series = report::trend(&ledger, period);
    if series.is_empty() {
        writeln!(out, "No expenses for {period}")?;
        return Ok(());
    }
    for (date, total) in series {
        writeln!(out, "{date}  {:>12}", format_amount(total))?;
    }
    Ok(())
}

fn cli_months(store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let ledger = store.load()?;
    let current = budget::current_period(local_now());
    for period in report::periods(&ledger, current) {
        let count = ledger.in_period(period).count();
        let marker = if period == current { " (current)" } else { "" };
        writeln!(out, "{period}  {count:>5} expense(s){marker}")?;
    }
    Ok(())
}

fn cli_export(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let ledger = store.load()?;

    if positional(args) == Some("-") {
        out.write_all(&store::export_bytes(&ledger)?)?;
        return Ok(());
    }

    let path = positional(args).map(shellexpand).unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/tally-export.csv")
    });
    let count = store::export_to_path(&ledger, Path::new(&path))
        .with_context(|| format!("Failed to export to {path}"))?;
    writeln!(out, "Exported {count} expense(s) to {path}")?;
    Ok(())
}

fn cli_reset(args: &[String], store: &LedgerStore, out: &mut impl Write) -> Result<()> {
    let period = period_arg(positional(args))?;
    if !has_flag(args, "--yes") {
        let count = store.load()?.in_period(period).count();
        anyhow::bail!("This deletes {count} expense(s) for {period}. Re-run with --yes to confirm");
    }

    // A fresh session state: the CLI has no income or undo history to keep.
    let mut state = BudgetState::new(local_now());
    let outcome = budget::reset_period(&mut state, store, period)?;
    writeln!(out, "Cleared {} expense(s) for {period}", outcome.value)?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
