//! View components. Each screen renders from borrowed state only.

pub mod dashboard;
pub mod form;
pub mod info;
pub mod styles;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use styles::Theme;

/// Navigation bar; `selected` indexes `titles`.
pub fn render_tabs(f: &mut Frame, area: Rect, titles: &[&str], selected: usize) {
    let titles: Vec<Line> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| Line::from(format!("F{} {title}", i + 1)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Theme::text_secondary())
        .highlight_style(Theme::tab_active())
        .block(
            Block::default()
                .title(Span::styled(" PulmoProbe AI ", Theme::title()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    f.render_widget(tabs, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "Predictions are indicative estimates and do not replace professional medical evaluation.",
            Theme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("[Ctrl+Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}
