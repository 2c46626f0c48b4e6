use std::cmp::Ordering;
use std::collections::HashSet;

use connscope_types::ProviderConnection;

use crate::labels::{compare_by_provider, provider_name};
use crate::registry::ProviderRegistry;

/// Table columns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Provider,
    Namespace,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Name, Column::Provider, Column::Namespace];

    pub fn header(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Provider => "Provider",
            Self::Namespace => "Namespace",
        }
    }

    /// Whether the search box matches against this column
    pub fn searchable(&self) -> bool {
        !matches!(self, Self::Provider)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

/// A rendered table row, borrowing from the fetched records
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub uid: &'a str,
    pub name: &'a str,
    pub provider: &'a str,
    pub namespace: &'a str,
    pub selected: bool,
}

/// Sort, search, selection and cursor state for the connections table
#[derive(Debug, Default)]
pub struct ConnectionTable {
    sort: Option<SortSpec>,
    search: String,
    selected: HashSet<String>,
    cursor: usize,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Sort by a column; sorting by the active column flips direction
    pub fn sort_by(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.column == column => SortSpec {
                column,
                direction: match spec.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => SortSpec {
                column,
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.cursor = 0;
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Visible rows: filtered by the search text, then stable-sorted
    pub fn rows<'a>(
        &self,
        records: &'a [ProviderConnection],
        registry: &'a ProviderRegistry,
    ) -> Vec<Row<'a>> {
        let needle = self.search.to_lowercase();
        let mut visible: Vec<&ProviderConnection> = records
            .iter()
            .filter(|conn| needle.is_empty() || matches_search(conn, &needle))
            .collect();

        if let Some(spec) = self.sort {
            // slice::sort_by is stable
            visible.sort_by(|a, b| {
                let ord = compare(a, b, spec.column, registry);
                match spec.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        visible
            .into_iter()
            .map(|conn| Row {
                uid: &conn.uid,
                name: &conn.name,
                provider: provider_name(&conn.labels, registry),
                namespace: &conn.namespace,
                selected: self.selected.contains(&conn.uid),
            })
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            row_count - 1
        } else {
            self.cursor.min(row_count) - 1
        };
    }

    pub fn cursor_down(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.cursor = if self.cursor + 1 >= row_count {
            0
        } else {
            self.cursor + 1
        };
    }

    /// Toggle selection of a row by uid
    pub fn toggle_selected(&mut self, uid: &str) {
        if !self.selected.remove(uid) {
            self.selected.insert(uid.to_string());
        }
    }

    pub fn is_selected(&self, uid: &str) -> bool {
        self.selected.contains(uid)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Records currently selected, in fetch order
    pub fn selected_records<'a>(
        &self,
        records: &'a [ProviderConnection],
    ) -> Vec<&'a ProviderConnection> {
        records
            .iter()
            .filter(|conn| self.selected.contains(&conn.uid))
            .collect()
    }

    /// Reconcile with a fresh snapshot: drop vanished uids and clamp the cursor
    pub fn sync(&mut self, records: &[ProviderConnection], registry: &ProviderRegistry) {
        let live: HashSet<&str> = records.iter().map(|c| c.uid.as_str()).collect();
        self.selected.retain(|uid| live.contains(uid.as_str()));

        let visible = self.rows(records, registry).len();
        if self.cursor >= visible {
            self.cursor = visible.saturating_sub(1);
        }
    }
}

fn matches_search(conn: &ProviderConnection, needle: &str) -> bool {
    Column::ALL
        .iter()
        .filter(|c| c.searchable())
        .any(|column| match column {
            Column::Name => conn.name.to_lowercase().contains(needle),
            Column::Namespace => conn.namespace.to_lowercase().contains(needle),
            Column::Provider => false,
        })
}

fn compare(
    a: &ProviderConnection,
    b: &ProviderConnection,
    column: Column,
    registry: &ProviderRegistry,
) -> Ordering {
    match column {
        Column::Name => a.name.cmp(&b.name),
        Column::Provider => compare_by_provider(a, b, registry),
        Column::Namespace => a.namespace.cmp(&b.namespace),
    }
}
