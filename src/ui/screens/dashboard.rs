use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Trend + recent
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_trend_chart(f, body[0], app);
    render_recent(f, body[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = app.totals;
    let income_note = if app.state.income_is_set() {
        format!("for {}", app.current_period())
    } else {
        "not set: :income <amount>".to_string()
    };
    let count = app.ledger.in_period(app.current_period()).count();

    render_card(f, cards[0], "Income", totals.income, theme::GREEN, income_note);
    render_card(
        f,
        cards[1],
        "Spent",
        totals.spent,
        theme::RED,
        format!("{count} expenses"),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        totals.remaining,
        if totals.is_overspent() {
            theme::RED
        } else {
            theme::GREEN
        },
        if totals.is_overspent() {
            "over budget".to_string()
        } else {
            String::new()
        },
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Daily Spending {} ", app.current_period());
    if app.trend.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses this month. Add one with :add <description> <amount>",
            theme::dim_style(),
        )))
        .centered()
        .block(titled_block(title));
        f.render_widget(msg, area);
        return;
    }

    // Newest days win when the chart is too narrow for the whole month
    let max_bars = (area.width.saturating_sub(2) / 5).max(1) as usize;
    let skip = app.trend.len().saturating_sub(max_bars);

    let bars: Vec<Bar> = app
        .trend
        .iter()
        .skip(skip)
        .map(|(date, total)| {
            Bar::default()
                .value(total.ceil().to_u64().unwrap_or(0))
                .text_value(format!("{}", total.round()))
                .label(Line::from(format!("{:02}", date.day())))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let block = titled_block(" Recent ".to_string());
    if app.recent.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled("Nothing yet", theme::dim_style())))
            .centered()
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    let undo_id = app.state.undo_candidate().map(|r| r.id);
    let desc_width = (area.width as usize).saturating_sub(2 + 10 + 12);

    let lines: Vec<Line> = app
        .recent
        .iter()
        .map(|r| {
            let marker = if Some(r.id) == undo_id { "*" } else { " " };
            Line::from(vec![
                Span::styled(
                    format!("{marker}{} ", r.timestamp.format("%d %H:%M")),
                    theme::dim_style(),
                ),
                Span::styled(
                    format!("{:<desc_width$}", truncate(&r.description, desc_width)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("{:>12}", format_amount(r.amount)),
                    theme::expense_style(),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
