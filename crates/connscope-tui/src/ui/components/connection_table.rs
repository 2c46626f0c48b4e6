use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row as TableRow, StatefulWidget, Table, TableState},
};

use connscope_core::{Column, Row, SortDirection, SortSpec};

use crate::ui::Theme;

/// Table of provider connections with sort indicators and row marks
pub struct ConnectionTableView<'a> {
    rows: Vec<Row<'a>>,
    sort: Option<SortSpec>,
    title: String,
}

impl<'a> ConnectionTableView<'a> {
    pub fn new(rows: Vec<Row<'a>>, sort: Option<SortSpec>) -> Self {
        Self {
            rows,
            sort,
            title: " Provider connections ".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn header_label(&self, column: Column) -> String {
        match self.sort {
            Some(spec) if spec.column == column => {
                let arrow = match spec.direction {
                    SortDirection::Ascending => "▲",
                    SortDirection::Descending => "▼",
                };
                format!("{} {}", column.header(), arrow)
            }
            _ => column.header().to_string(),
        }
    }
}

impl StatefulWidget for ConnectionTableView<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = TableRow::new(
            std::iter::once(Cell::from("  ")).chain(
                Column::ALL
                    .iter()
                    .map(|c| Cell::from(self.header_label(*c))),
            ),
        )
        .style(Theme::table_header());

        let rows = self.rows.iter().map(|row| {
            let (mark, style) = if row.selected {
                ("✓ ", Theme::row_marked())
            } else {
                ("  ", Theme::list_item())
            };
            TableRow::new(vec![
                Cell::from(mark),
                Cell::from(row.name),
                Cell::from(row.provider),
                Cell::from(row.namespace),
            ])
            .style(style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused())
                .title(Span::styled(self.title.as_str(), Theme::title())),
        )
        .row_highlight_style(Theme::list_item_selected())
        .highlight_symbol("▶ ");

        StatefulWidget::render(table, area, buf, state);
    }
}
