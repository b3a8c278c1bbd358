//! Home screen: intake form and the latest prediction.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use pulmoprobe_core::PredictionResult;
use pulmoprobe_schema::field::parse_flag;
use pulmoprobe_schema::{FieldDescriptor, FieldKind};

use super::styles::Theme;
use crate::session::{IntakeForm, Phase};

const LABEL_WIDTH: usize = 28;

pub fn render_home(f: &mut Frame, area: Rect, form: &IntakeForm, marker: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_form_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_fields(f, body[0], form);
    render_result(f, body[1], form, marker);
    render_form_footer(f, chunks[2], form);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Lung Cancer Survival Prediction", Theme::title()),
        Span::styled(
            " │ enter patient details for an AI-powered estimate",
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

fn render_fields(f: &mut Frame, area: Rect, form: &IntakeForm) {
    let schema = form.schema();
    let editable = !form.is_locked();
    let mut lines: Vec<Line> = Vec::new();

    for section in schema.sections() {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {section}"),
            Theme::subtitle(),
        )));

        for field in schema.fields_in_section(section) {
            let index = schema.fields.iter().position(|d| d.name == field.name);
            let selected = index == Some(form.selected());
            lines.push(field_line(field, form.input().value(&field.name), selected, editable));

            if let Some(message) = form.error_for(&field.name) {
                lines.push(Line::from(Span::styled(
                    format!("     ! {message}"),
                    Theme::danger(),
                )));
            }
        }
    }

    let border_style = if editable {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .title(Span::styled(" Patient Intake ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(border_style);

    // Keep the selected field on screen when the form is taller than the panel.
    let visible = area.height.saturating_sub(2) as usize;
    let cursor_line = lines
        .iter()
        .position(|l| l.spans.first().is_some_and(|s| s.content.starts_with(" ▶")))
        .unwrap_or(0);
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(2)) as u16;

    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn field_line<'a>(
    field: &'a FieldDescriptor,
    value: &'a str,
    selected: bool,
    editable: bool,
) -> Line<'a> {
    let pointer = if selected { " ▶ " } else { "   " };
    let label_style = if selected {
        Theme::focused()
    } else {
        Theme::text_secondary()
    };

    let mut spans = vec![
        Span::styled(pointer, Theme::focused()),
        Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), label_style),
    ];

    match &field.kind {
        FieldKind::Numeric { .. } => {
            if value.is_empty() {
                let hint = field.hint.as_deref().unwrap_or("");
                spans.push(Span::styled(hint, Theme::text_muted()));
            } else {
                spans.push(Span::styled(value, Theme::text()));
            }
            if selected && editable {
                spans.push(Span::styled("▌", Theme::focused()));
            }
        }
        FieldKind::Categorical { .. } => {
            if selected && editable {
                spans.push(Span::styled(format!("‹ {value} ›"), Theme::text()));
            } else {
                spans.push(Span::styled(value, Theme::text()));
            }
        }
        FieldKind::Flag => {
            let text = match parse_flag(value) {
                Some(true) => "[x] Yes",
                Some(false) => "[ ] No",
                None => "[?]",
            };
            spans.push(Span::styled(text, Theme::text()));
        }
    }

    Line::from(spans)
}

fn render_result(f: &mut Frame, area: Rect, form: &IntakeForm, marker: &str) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    match form.phase() {
        Phase::Editing => {
            let text = vec![
                Line::raw(""),
                Line::from(Span::styled(
                    " Fill in the form and press Enter to get a prediction.",
                    Theme::text_secondary(),
                )),
                Line::raw(""),
                Line::from(vec![
                    Span::styled(" [Ctrl+S] ", Theme::key_hint()),
                    Span::styled("loads a sample patient", Theme::key_desc()),
                ]),
            ];
            f.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
                area,
            );
        }
        Phase::InFlight => {
            let text = vec![
                Line::raw(""),
                Line::from(Span::styled(" Analyzing...", Theme::pending())),
            ];
            f.render_widget(Paragraph::new(text).block(block), area);
        }
        Phase::Showing(result) => render_outcome(f, area, block, result, marker),
    }
}

fn render_outcome(f: &mut Frame, area: Rect, block: Block, result: &PredictionResult, marker: &str) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let risk_style = Theme::risk(&result.risk, marker, result.is_error());
    let summary = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(" Prediction Result: ", Theme::text_secondary()),
            Span::styled(result.risk.as_str(), risk_style),
        ]),
        Line::from(vec![
            Span::styled(" Confidence Score: ", Theme::text_secondary()),
            Span::styled(format!("{}%", result.confidence), Theme::text()),
        ]),
    ];
    f.render_widget(Paragraph::new(summary), chunks[0]);

    if !result.is_error() {
        let ratio = (result.confidence / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::NONE))
            .gauge_style(risk_style)
            .ratio(ratio)
            .label(format!("{:.1}%", result.confidence));
        f.render_widget(gauge, chunks[1]);
    }

    let mut details = Vec::new();
    if let Some(error) = &result.error {
        details.push(Line::from(Span::styled(format!(" {error}"), Theme::danger())));
        details.push(Line::raw(""));
    }
    details.push(Line::from(vec![
        Span::styled(" [Ctrl+R] ", Theme::key_hint()),
        Span::styled("start a new assessment", Theme::key_desc()),
    ]));
    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: false }), chunks[2]);
}

fn render_form_footer(f: &mut Frame, area: Rect, form: &IntakeForm) {
    let content = if form.has_errors() {
        Line::from(Span::styled(
            " Please fix the highlighted fields before submitting.",
            Theme::danger(),
        ))
    } else {
        Line::from(vec![
            Span::styled(" [↑↓] ", Theme::key_hint()),
            Span::styled("Field ", Theme::key_desc()),
            Span::styled("[←→/Space] ", Theme::key_hint()),
            Span::styled("Choose ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Predict ", Theme::key_desc()),
            Span::styled("[Del] ", Theme::key_hint()),
            Span::styled("Clear ", Theme::key_desc()),
            Span::styled("[Ctrl+R] ", Theme::key_hint()),
            Span::styled("Reset", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
