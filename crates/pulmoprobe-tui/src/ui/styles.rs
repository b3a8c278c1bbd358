use ratatui::style::{Color, Modifier, Style};

/// Colour palette for every view.
pub struct Theme;

impl Theme {
    pub const PRIMARY: Color = Color::Rgb(37, 99, 235); // blue-600
    pub const PRIMARY_LIGHT: Color = Color::Rgb(96, 165, 250); // blue-400
    pub const BORDER: Color = Color::Rgb(100, 116, 139); // slate-500

    pub const LOW: Color = Color::Rgb(16, 185, 129); // emerald
    pub const HIGH: Color = Color::Rgb(244, 63, 94); // rose
    pub const PENDING: Color = Color::Rgb(251, 191, 36); // amber

    pub const TEXT: Color = Color::Rgb(248, 250, 252);
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn low() -> Style {
        Style::default().fg(Self::LOW)
    }

    pub fn danger() -> Style {
        Style::default().fg(Self::HIGH)
    }

    pub fn pending() -> Style {
        Style::default().fg(Self::PENDING)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a risk label. Labels containing `marker` use the danger
    /// colour; failed predictions are muted.
    pub fn risk(label: &str, marker: &str, failed: bool) -> Style {
        if failed {
            Self::text_muted()
        } else if label.contains(marker) {
            Self::danger().add_modifier(Modifier::BOLD)
        } else {
            Self::low().add_modifier(Modifier::BOLD)
        }
    }
}
