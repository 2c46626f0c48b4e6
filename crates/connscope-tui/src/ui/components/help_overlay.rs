use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{Layout, Theme};

/// (section, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j/↓ k/↑", "Move cursor"),
            ("1 2 3", "Sort by name / provider / namespace"),
            ("/", "Search name or namespace"),
            ("Space", "Mark connection"),
            ("r", "Refresh now"),
        ],
    ),
    (
        "Connections",
        &[
            ("a", "Add connection"),
            ("d/Del", "Delete connection"),
            ("D", "Delete marked connections"),
            ("x", "Dismiss notice"),
        ],
    ),
    ("Confirmation", &[("y/Enter", "Delete"), ("n/Esc", "Cancel")]),
    (
        "General",
        &[("?", "Toggle this help"), ("Esc", "Go back"), ("q", "Quit")],
    ),
];

/// Keybinding reference drawn over the current screen
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let area = Layout::popup(frame.area(), 56, 26);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(*section, Theme::text_highlight())));
            lines.extend(keys.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {:>9}", key), Theme::list_item_current()),
                    Span::styled(format!("  {}", desc), Theme::text()),
                ])
            }));
        }

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused())
                .title(Span::styled(" Keybindings ", Theme::title())),
        );

        frame.render_widget(help, area);
    }
}
