//! Static About and Contact screens.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use pulmoprobe_schema::IntakeSchema;

use super::styles::Theme;

const FEATURES: &[(&str, &str)] = &[
    (
        "Advanced AI Model",
        "A fine-tuned Random Forest model analyses the intake fields and returns a risk label with a confidence score.",
    ),
    (
        "Instantaneous Results",
        "Each submission is scored by the hosted service in a single request.",
    ),
    (
        "Secure & Anonymous",
        "No patient names are collected. History lives only in this session and is never written to disk.",
    ),
];

pub fn render_about(f: &mut Frame, area: Rect, schema: &IntakeSchema, endpoint: &str) {
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" Why choose PulmoProbe AI?", Theme::title())),
        Line::raw(""),
    ];

    for (title, description) in FEATURES {
        lines.push(Line::from(Span::styled(format!(" {title}"), Theme::subtitle())));
        lines.push(Line::from(Span::styled(
            format!("   {description}"),
            Theme::text_secondary(),
        )));
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(vec![
        Span::styled(" Scoring endpoint  ", Theme::text_secondary()),
        Span::styled(endpoint, Theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Intake schema     ", Theme::text_secondary()),
        Span::styled(format!("{} ({})", schema.name, schema.id), Theme::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Encoded features  ", Theme::text_secondary()),
        Span::styled(schema.feature_width().to_string(), Theme::text()),
    ]));

    let block = Block::default()
        .title(Span::styled(" About ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_contact(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" PulmoProbe AI", Theme::title())),
        Line::from(Span::styled(
            " Early and accurate pulmonary risk predictions.",
            Theme::text_secondary(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" GitHub    ", Theme::text_secondary()),
            Span::styled("https://github.com", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled(" Twitter   ", Theme::text_secondary()),
            Span::styled("https://twitter.com", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled(" LinkedIn  ", Theme::text_secondary()),
            Span::styled("https://linkedin.com", Theme::text()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Contact ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}
