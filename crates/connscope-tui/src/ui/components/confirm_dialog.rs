use ratatui::{
    Frame,
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use connscope_core::ConfirmPrompt;

use crate::ui::{Layout, Theme};

/// Modal confirmation for destructive actions
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn render(frame: &mut Frame, prompt: &ConfirmPrompt) {
        let area = Layout::popup(frame.area(), 64, 12);
        frame.render_widget(Clear, area);

        let text = vec![
            Line::from(Span::styled(prompt.message.as_str(), Theme::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y] ", Theme::error()),
                Span::styled("Delete", Theme::text()),
                Span::styled("    ", Theme::text()),
                Span::styled("[n] ", Theme::text_highlight()),
                Span::styled("Cancel", Theme::text()),
            ])
            .alignment(Alignment::Center),
        ];

        let dialog = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_danger())
                .title(Span::styled(format!(" {} ", prompt.title), Theme::error())),
        );

        frame.render_widget(dialog, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connscope_core::ConnectionRef;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_renders_title_and_target() {
        let prompt = ConfirmPrompt {
            title: "Delete provider connection".to_string(),
            message: "You are about to delete aws-east.".to_string(),
            targets: vec![ConnectionRef::new("aws-east", "ns1")],
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| ConfirmDialog::render(frame, &prompt))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Delete provider connection"));
        assert!(content.contains("aws-east"));
    }
}
