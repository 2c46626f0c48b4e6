use ratatui::style::{Color, Modifier, Style};

use crate::app::NoticeLevel;

/// Palette and named styles shared by all screens
pub struct Theme;

impl Theme {
    pub const TEXT: Color = Color::White;
    pub const MUTED: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const MARK: Color = Color::Yellow;
    pub const OK: Color = Color::Green;
    pub const DESTRUCTIVE: Color = Color::Red;

    /// Background of the bottom status line
    const BAR: Color = Color::DarkGray;

    fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    fn bold(color: Color) -> Style {
        Self::fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Self::fg(Self::MUTED)
    }

    pub fn border_focused() -> Style {
        Self::fg(Self::ACCENT)
    }

    /// Frame of the delete dialog and the full-page error
    pub fn border_danger() -> Style {
        Self::fg(Self::DESTRUCTIVE)
    }

    pub fn title() -> Style {
        Self::bold(Self::ACCENT)
    }

    pub fn text() -> Style {
        Self::fg(Self::TEXT)
    }

    pub fn text_dim() -> Style {
        Self::fg(Self::MUTED)
    }

    pub fn text_highlight() -> Style {
        Self::bold(Self::MARK)
    }

    pub fn error() -> Style {
        Self::bold(Self::DESTRUCTIVE)
    }

    pub fn list_item() -> Style {
        Self::text()
    }

    /// Row under the cursor, in lists and in the connections table
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// The kubeconfig's current context
    pub fn list_item_current() -> Style {
        Self::bold(Self::OK)
    }

    pub fn table_header() -> Style {
        Self::bold(Self::MARK).add_modifier(Modifier::UNDERLINED)
    }

    /// Rows marked for a bulk delete
    pub fn row_marked() -> Style {
        Self::fg(Self::MARK)
    }

    pub fn status_bar() -> Style {
        Self::fg(Color::Gray).bg(Self::BAR)
    }

    pub fn status_bar_key() -> Style {
        Self::bold(Self::MARK).bg(Self::BAR)
    }

    pub fn notice(level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => Self::fg(Self::OK).bg(Self::BAR),
            NoticeLevel::Error => Self::bold(Self::DESTRUCTIVE).bg(Self::BAR),
        }
    }
}
