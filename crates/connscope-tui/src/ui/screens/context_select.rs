use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        Layout, Theme,
        components::{ContextList, StatusBar, list_nav_hints},
    },
};

/// Context selection screen
pub struct ContextSelectScreen;

impl ContextSelectScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let area = frame.area();
        let (header_area, content_area, status_area) = Layout::main(area);

        Self::render_header(frame, header_area);
        Self::render_list(frame, content_area, state);
        Self::render_status_bar(frame, status_area, state);
    }

    fn render_header(frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("connscope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled("Select Cluster Context", Theme::text()),
        ]);

        let header = Paragraph::new(title).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_list(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let list_area = Layout::centered_list(area, 80);

        frame.render_stateful_widget(
            ContextList::new(&state.contexts),
            list_area,
            &mut state.ui_state.list_state,
        );
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let status = StatusBar::new()
            .hints(list_nav_hints())
            .notice(state.ui_state.notice.as_ref())
            .right(format!("{} contexts", state.contexts.len()));

        frame.render_widget(status, area);
    }
}
