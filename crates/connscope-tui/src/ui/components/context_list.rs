use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use connscope_types::ContextInfo;

use crate::ui::Theme;

/// Selectable list of kubeconfig contexts, with cluster and default namespace
pub struct ContextList<'a> {
    contexts: &'a [ContextInfo],
}

impl<'a> ContextList<'a> {
    pub fn new(contexts: &'a [ContextInfo]) -> Self {
        Self { contexts }
    }

    fn item(ctx: &'a ContextInfo) -> ListItem<'a> {
        let mut spans = if ctx.is_current {
            vec![Span::styled(
                format!("{} (current)", ctx.name),
                Theme::list_item_current(),
            )]
        } else {
            vec![Span::styled(ctx.name.as_str(), Theme::list_item())]
        };

        if !ctx.cluster.is_empty() {
            spans.push(Span::styled(format!("  {}", ctx.cluster), Theme::text_dim()));
        }
        if let Some(ns) = &ctx.namespace {
            spans.push(Span::styled(format!("  ns:{}", ns), Theme::text_dim()));
        }

        ListItem::new(Line::from(spans))
    }
}

impl StatefulWidget for ContextList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items: Vec<ListItem> = self.contexts.iter().map(Self::item).collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focused())
                    .title(Span::styled(" Contexts ", Theme::title())),
            )
            .highlight_style(Theme::list_item_selected())
            .highlight_symbol("▶ ");

        StatefulWidget::render(list, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_marks_current_context_and_shows_cluster() {
        let contexts = vec![
            ContextInfo::new(
                "hub".into(),
                "hub-cluster".into(),
                "admin".into(),
                Some("open-cluster-management".into()),
                true,
            ),
            ContextInfo::new("spoke".into(), "spoke-cluster".into(), "admin".into(), None, false),
        ];

        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|frame| {
                let mut state = ListState::default().with_selected(Some(0));
                frame.render_stateful_widget(ContextList::new(&contexts), frame.area(), &mut state);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("hub (current)"));
        assert!(content.contains("spoke-cluster"));
        assert!(content.contains("ns:open-cluster-management"));
    }
}
