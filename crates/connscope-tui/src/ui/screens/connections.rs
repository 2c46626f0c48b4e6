use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState, Wrap},
};

use connscope_core::{ConfirmationState, FetchFailure, ViewState};

use crate::{
    app::AppState,
    ui::{
        Layout, Theme,
        components::{ConfirmDialog, ConnectionTableView, StatusBar, connection_hints},
    },
};

/// Provider connections screen: loading, error, empty or table
pub struct ConnectionsScreen;

impl ConnectionsScreen {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let (header_area, content_area, status_area) = Layout::main(area);

        Self::render_header(frame, header_area, state);

        match state.view.state() {
            ViewState::Loading => Self::render_loading(frame, content_area),
            ViewState::Error(failure) => Self::render_error(frame, content_area, failure),
            ViewState::Empty => Self::render_empty(frame, content_area),
            ViewState::Populated(_) => Self::render_table(frame, content_area, state),
        }

        Self::render_status_bar(frame, status_area, state);

        if let ConfirmationState::Open(prompt) = state.deletes.confirmation() {
            ConfirmDialog::render(frame, prompt);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let context_name = state.selected_context.as_deref().unwrap_or("unknown");
        let namespace = state.namespace.as_deref().unwrap_or("all namespaces");

        let title = Line::from(vec![
            Span::styled("connscope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(context_name, Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(namespace, Theme::text_highlight()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled("Provider connections", Theme::text()),
        ]);

        let header = Paragraph::new(title).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_loading(frame: &mut Frame, area: Rect) {
        let body = Paragraph::new(Line::from(Span::styled(
            "Loading provider connections...",
            Theme::text_dim(),
        )))
        .alignment(Alignment::Center)
        .block(Self::content_block());

        frame.render_widget(body, area);
    }

    fn render_error(frame: &mut Frame, area: Rect, failure: &FetchFailure) {
        let text = vec![
            Line::from(Span::styled(failure.kind.label(), Theme::error())),
            Line::from(""),
            Line::from(Span::styled(failure.message.as_str(), Theme::text())),
            Line::from(""),
            Line::from(Span::styled(
                "Retrying on the next refresh. Press r to retry now.",
                Theme::text_dim(),
            )),
        ];

        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_danger())
                    .title(Span::styled(" Error ", Theme::error())),
            );

        frame.render_widget(body, area);
    }

    fn render_empty(frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(Span::styled("No provider connections found.", Theme::title())),
            Line::from(""),
            Line::from(Span::styled(
                "Your cluster does not contain any provider connections.",
                Theme::text(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("[a] ", Theme::text_highlight()),
                Span::styled("Create connection", Theme::text()),
            ]),
        ];

        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Self::content_block());

        frame.render_widget(body, area);
    }

    fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
        let (search_area, table_area) = Layout::with_search_bar(
            area,
            state.ui_state.search_active || !state.table.search().is_empty(),
        );

        if let Some(search_area) = search_area {
            Self::render_search_bar(frame, search_area, state);
        }

        let rows = state.table.rows(state.view.records(), &state.registry);
        let title = if rows.len() == state.view.records().len() {
            format!(" Provider connections ({}) ", rows.len())
        } else {
            format!(
                " Provider connections ({} of {}) ",
                rows.len(),
                state.view.records().len()
            )
        };

        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(state.table.cursor()));
        }

        let table = ConnectionTableView::new(rows, state.table.sort()).title(title);
        frame.render_stateful_widget(table, table_area, &mut table_state);
    }

    fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let (text, border) = if state.ui_state.search_active {
            (
                format!("{}█", state.ui_state.search_input),
                Theme::border_focused(),
            )
        } else {
            (state.table.search().to_string(), Theme::border())
        };

        let bar = Paragraph::new(Line::from(Span::styled(text, Theme::text()))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(" Search name or namespace ", Theme::text_dim())),
        );

        frame.render_widget(bar, area);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut right = match state.view.state() {
            ViewState::Populated(records) => format!("{} connections", records.len()),
            other => other.label().to_string(),
        };
        if state.table.selected_count() > 0 {
            right = format!("{} marked │ {}", state.table.selected_count(), right);
        }
        if state.view.last_refresh_error().is_some() {
            right = format!("refresh failed │ {}", right);
        } else if let Some(updated) = state.last_updated {
            right = format!("{} │ updated {}", right, updated.format("%H:%M:%S"));
        }

        let status = StatusBar::new()
            .hints(connection_hints())
            .notice(state.ui_state.notice.as_ref())
            .right(right);

        frame.render_widget(status, area);
    }

    fn content_block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connscope_core::{FailureKind, ProviderConnection, ProviderRegistry};
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn render_to_string(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| ConnectionsScreen::render(frame, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(tx, ProviderRegistry::builtin());
        state.begin_connections();
        state
    }

    #[test]
    fn test_empty_state_shows_call_to_action() {
        let mut state = state();
        let generation = state.generation;
        state.apply_fetch(generation, Ok(vec![]));

        let screen = render_to_string(&state);
        assert!(screen.contains("No provider connections found."));
        assert!(screen.contains("Create connection"));
        assert!(!screen.contains("Namespace"));
    }

    #[test]
    fn test_populated_renders_resolved_provider() {
        let mut state = state();
        let generation = state.generation;
        state.apply_fetch(
            generation,
            Ok(vec![
                ProviderConnection::new("u1".into(), "aws-east".into(), "ns1".into())
                    .with_labels(["cluster.open-cluster-management.io/provider=aws"]),
            ]),
        );

        let screen = render_to_string(&state);
        assert!(screen.contains("aws-east"));
        assert!(screen.contains("Amazon Web Services"));
        assert!(screen.contains("Namespace"));
    }

    #[test]
    fn test_first_load_error_is_full_page() {
        let mut state = state();
        let generation = state.generation;
        state.apply_fetch(
            generation,
            Err(FetchFailure::new(FailureKind::Forbidden, "secrets is forbidden")),
        );

        let screen = render_to_string(&state);
        assert!(screen.contains("Forbidden"));
        assert!(screen.contains("secrets is forbidden"));
    }

    #[test]
    fn test_open_dialog_is_drawn_over_table() {
        let mut state = state();
        let generation = state.generation;
        state.apply_fetch(
            generation,
            Ok(vec![ProviderConnection::new(
                "u1".into(),
                "aws-east".into(),
                "ns1".into(),
            )]),
        );
        state.request_delete_current();

        let screen = render_to_string(&state);
        assert!(screen.contains("Delete provider connection"));
    }
}
