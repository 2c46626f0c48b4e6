use ratatui::layout::{Constraint, Flex, Layout as RatatuiLayout, Margin, Rect};

/// Screen regions shared by the context list and the connections page
pub struct Layout;

impl Layout {
    /// Header (3 rows), content, and a one-row status line
    pub fn main(area: Rect) -> (Rect, Rect, Rect) {
        let [header, content, status] = RatatuiLayout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        (header, content, status)
    }

    /// Horizontally centered column with a blank row above and below
    pub fn centered_list(area: Rect, width_percent: u16) -> Rect {
        let [column] = RatatuiLayout::horizontal([Constraint::Percentage(width_percent)])
            .flex(Flex::Center)
            .areas(area);

        column.inner(Margin::new(0, 1))
    }

    /// Split the connections content into an optional search bar and the table
    pub fn with_search_bar(area: Rect, show_search: bool) -> (Option<Rect>, Rect) {
        if !show_search {
            return (None, area);
        }

        let [bar, table] =
            RatatuiLayout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
        (Some(bar), table)
    }

    /// Fixed-size popup centered in the area, shrunk to fit
    pub fn popup(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));

        let [row] = RatatuiLayout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = RatatuiLayout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}
