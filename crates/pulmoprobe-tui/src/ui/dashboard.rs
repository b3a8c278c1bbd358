//! Dashboard: live statistics over the session history.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use pulmoprobe_core::dashboard::{Dashboard, DashboardOptions, DashboardSummary};
use pulmoprobe_core::History;

use super::styles::Theme;

pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    history: &History,
    options: &DashboardOptions,
    table_state: &mut TableState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(f, chunks[0]);

    match dashboard {
        Dashboard::Empty => render_empty(f, chunks[1]),
        Dashboard::Summary(summary) => {
            render_summary(f, chunks[1], summary, history, options, table_state)
        }
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Live Dashboard", Theme::title()),
        Span::styled(
            " │ updates with every new prediction made",
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );
    f.render_widget(header, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::raw(""),
        Line::from(Span::styled("No Prediction Data Yet", Theme::title())),
        Line::raw(""),
        Line::from(Span::styled(
            "Make a prediction on the Home screen to see live statistics here.",
            Theme::text_secondary(),
        )),
        Line::from(vec![
            Span::styled("[F1] ", Theme::key_hint()),
            Span::styled("Go to Home", Theme::key_desc()),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_summary(
    f: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    history: &History,
    options: &DashboardOptions,
    table_state: &mut TableState,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Min(5),
        ])
        .split(area);

    render_stat_cards(f, rows[0], summary);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_group_chart(f, charts[0], summary, options);
    render_breakdown(f, charts[1], summary);
    render_history_table(f, rows[2], history, options, table_state);
}

fn render_stat_cards(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let stats = [
        ("Total Predictions", summary.total, Theme::text()),
        ("High-Risk Cases", summary.high_risk, Theme::danger()),
        ("Countries Analyzed", summary.distinct_values, Theme::text()),
    ];

    for ((label, value, style), card) in stats.into_iter().zip(cards.iter()) {
        let block = Block::default()
            .title(Span::styled(format!(" {label} "), Theme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let body = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            style.add_modifier(ratatui::style::Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(body, *card);
    }
}

fn render_group_chart(
    f: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    options: &DashboardOptions,
) {
    let bars: Vec<Bar> = summary
        .groups
        .iter()
        .map(|g| {
            Bar::default()
                .value(g.count as u64)
                .label(Line::from(g.name.clone()))
                .style(Style::default().fg(Theme::PRIMARY))
                .value_style(Theme::tab_active())
        })
        .collect();

    let title = format!(" Predictions by {} ", humanize(&options.group_field));
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(title, Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(2)
        .max(summary.max_group_count().max(1) as u64);

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let total = summary.total.max(1) as f64;
    let share = |n: usize| n as f64 * 100.0 / total;

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  ● Low Risk   ", Theme::low()),
            Span::styled(
                format!("{:>4}  ({:.0}%)", summary.breakdown.low, share(summary.breakdown.low)),
                Theme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ● High Risk  ", Theme::danger()),
            Span::styled(
                format!("{:>4}  ({:.0}%)", summary.breakdown.high, share(summary.breakdown.high)),
                Theme::text(),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  ", Theme::text()),
            Span::styled(
                "█".repeat(proportion(summary.breakdown.low, summary.total, 20)),
                Theme::low(),
            ),
            Span::styled(
                "█".repeat(proportion(summary.breakdown.high, summary.total, 20)),
                Theme::danger(),
            ),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Prediction Breakdown ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history_table(
    f: &mut Frame,
    area: Rect,
    history: &History,
    options: &DashboardOptions,
    table_state: &mut TableState,
) {
    let header = Row::new(["Patient ID", "Age", "Cancer Stage", "Prediction", "Confidence", "Time"])
        .style(Theme::subtitle())
        .bottom_margin(1);

    let tz = jiff::tz::TimeZone::system();
    let rows: Vec<Row> = history
        .iter_newest_first()
        .map(|record| {
            let risk_style = Theme::risk(
                &record.output.risk,
                &options.high_risk_marker,
                record.output.is_error(),
            );
            let time = record.created_at.to_zoned(tz.clone()).strftime("%H:%M:%S").to_string();
            Row::new(vec![
                Cell::from(record.short_id()),
                Cell::from(record.inputs.value("age").to_string()),
                Cell::from(record.inputs.value(&options.group_field).to_string()),
                Cell::from(Span::styled(record.output.risk.clone(), risk_style)),
                Cell::from(format!("{}%", record.output.confidence)),
                Cell::from(time).style(Theme::text_muted()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(5),
        Constraint::Length(14),
        Constraint::Min(12),
        Constraint::Length(11),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(Span::styled(" Recent Predictions ", Theme::subtitle()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .row_highlight_style(Theme::focused());

    f.render_stateful_widget(table, area, table_state);
}

/// Width in cells of `part` out of `total` on a `width`-cell bar.
fn proportion(part: usize, total: usize, width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    part * width / total
}

fn humanize(field: &str) -> String {
    field.replace('_', " ")
}
