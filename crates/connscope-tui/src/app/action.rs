use connscope_core::Column;

/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // Navigation
    GoBack,
    Quit,

    // Selection
    SelectContext(String),

    // UI toggles
    ToggleHelp,

    // List navigation
    ListUp,
    ListDown,
    ListSelect,

    // Search in the connections table
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    ApplySearch,

    // Connections table
    SortBy(Column),
    ToggleSelection,
    AddConnection,
    Refresh,

    // Delete flow
    DeleteConnection,
    DeleteSelected,
    ConfirmDelete,
    CancelDelete,

    // Notices
    DismissNotice,

    // Render request
    Render,
}
