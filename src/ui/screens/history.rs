use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let scope = match app.history_month {
        Some(month) => month.to_string(),
        None => "all months".to_string(),
    };
    let search = if app.search_input.is_empty() {
        String::new()
    } else {
        format!("search: '{}' ", app.search_input)
    };

    if app.history.is_empty() {
        let msg = if app.ledger.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    ":income <amount> then :add <description> <amount>",
                    theme::dim_style(),
                )),
            ]
        } else if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No expenses matching '{}' in {scope}", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No expenses for {scope}"),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "H/L to change month, :month all to see everything",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" History {scope} (0) {search}"),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Month", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .history
        .iter()
        .enumerate()
        .skip(app.history_cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let style = if i == app.history_cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", record.timestamp_label())),
                Cell::from(record.period.to_string()),
                Cell::from(truncate(&record.description, 40)),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(9),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " History {scope} ({}) total {} {search}",
                    app.history.len(),
                    format_amount(app.history_total()),
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
