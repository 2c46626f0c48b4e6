use chrono::{DateTime, Local};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use connscope_core::{
    ConnectionTable, DeleteBatch, DeleteController, DeleteReport, FetchFailure, ListView,
    NavigationRequest, ProviderConnection, ProviderRegistry,
};
use connscope_types::ContextInfo;

use super::Action;

/// Screen enumeration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    ContextSelect,
    Connections,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-blocking message shown in the status bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// UI-specific transient state
#[derive(Default)]
pub struct UiState {
    /// Is help overlay visible?
    pub help_visible: bool,

    /// List state for the context selection screen
    pub list_state: ListState,

    /// Is the search bar active?
    pub search_active: bool,

    /// Current search input text
    pub search_input: String,

    /// Notice to display (if any)
    pub notice: Option<Notice>,
}

/// Global application state
pub struct AppState {
    /// Current screen being displayed
    pub current_screen: Screen,

    /// Navigation stack for back navigation
    pub screen_stack: Vec<Screen>,

    /// Available Kubernetes contexts
    pub contexts: Vec<ContextInfo>,

    /// Selected Kubernetes context
    pub selected_context: Option<String>,

    /// Namespace scope of the list (None = all namespaces)
    pub namespace: Option<String>,

    /// Console base URL used when showing navigation targets
    pub console_url: Option<String>,

    pub registry: ProviderRegistry,
    pub view: ListView,
    pub table: ConnectionTable,
    pub deletes: DeleteController,

    /// Identifies the live connections view; bumped when it is rebuilt
    pub generation: u64,

    /// A poll fetch has been issued and not yet answered
    pub fetch_in_flight: bool,

    /// Time of the last successful fetch
    pub last_updated: Option<DateTime<Local>>,

    /// UI state
    pub ui_state: UiState,

    /// Whether app should quit
    pub should_quit: bool,

    /// Channel sender for async actions
    pub action_tx: mpsc::UnboundedSender<Action>,
}

impl AppState {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, registry: ProviderRegistry) -> Self {
        let mut ui_state = UiState::default();
        ui_state.list_state.select(Some(0));

        Self {
            current_screen: Screen::ContextSelect,
            screen_stack: Vec::new(),
            contexts: Vec::new(),
            selected_context: None,
            namespace: None,
            console_url: None,
            registry,
            view: ListView::new(),
            table: ConnectionTable::new(),
            deletes: DeleteController::new(),
            generation: 0,
            fetch_in_flight: false,
            last_updated: None,
            ui_state,
            should_quit: false,
            action_tx,
        }
    }

    /// Navigate to a new screen, pushing current to stack
    pub fn navigate_to(&mut self, screen: Screen) {
        self.screen_stack.push(self.current_screen.clone());
        self.current_screen = screen;
        self.ui_state.list_state.select(Some(0));
    }

    /// Go back to previous screen
    pub fn go_back(&mut self) -> bool {
        if let Some(prev_screen) = self.screen_stack.pop() {
            if self.current_screen == Screen::Connections {
                self.leave_connections();
            }
            self.current_screen = prev_screen;
            self.ui_state.list_state.select(Some(0));
            true
        } else {
            false
        }
    }

    /// Move context selection up
    pub fn list_up(&mut self) {
        let len = self.contexts.len();
        if len == 0 {
            return;
        }

        let i = match self.ui_state.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.ui_state.list_state.select(Some(i));
    }

    /// Move context selection down
    pub fn list_down(&mut self) {
        let len = self.contexts.len();
        if len == 0 {
            return;
        }

        let i = match self.ui_state.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.ui_state.list_state.select(Some(i));
    }

    /// Get currently selected index
    pub fn selected_index(&self) -> Option<usize> {
        self.ui_state.list_state.selected()
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn show_error(&mut self, msg: String) {
        self.ui_state.notice = Some(Notice {
            level: NoticeLevel::Error,
            text: msg,
        });
    }

    pub fn show_info(&mut self, msg: String) {
        self.ui_state.notice = Some(Notice {
            level: NoticeLevel::Info,
            text: msg,
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.ui_state.notice = None;
    }

    // ------------------------------------------------------------------
    // Connections view lifecycle
    // ------------------------------------------------------------------

    /// Start a fresh connections view and return its generation
    pub fn begin_connections(&mut self) -> u64 {
        self.generation += 1;
        self.view.reset();
        self.table = ConnectionTable::new();
        self.deletes.cancel();
        self.fetch_in_flight = false;
        self.last_updated = None;
        self.generation
    }

    /// Tear down the connections view; late results become no-ops
    fn leave_connections(&mut self) {
        self.generation += 1;
        self.view.reset();
        self.deletes.cancel();
        self.fetch_in_flight = false;
        self.ui_state.search_active = false;
        self.ui_state.search_input.clear();
    }

    /// Apply a poll result; returns false when it belongs to a torn-down view
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<ProviderConnection>, FetchFailure>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.fetch_in_flight = false;
        self.apply_records(result);
        true
    }

    /// Apply the outcome of a delete batch and its refresh
    pub fn apply_delete_report(&mut self, generation: u64, report: DeleteReport) -> bool {
        if generation != self.generation {
            return false;
        }

        let summary = report.summary();
        if report.failures.is_empty() {
            self.show_info(summary);
        } else {
            self.show_error(summary);
        }
        self.apply_records(report.refresh);
        true
    }

    fn apply_records(&mut self, result: Result<Vec<ProviderConnection>, FetchFailure>) {
        if result.is_ok() {
            self.last_updated = Some(Local::now());
        }
        self.view.apply_fetch(result);
        self.table.sync(self.view.records(), &self.registry);
    }

    // ------------------------------------------------------------------
    // Connections table
    // ------------------------------------------------------------------

    /// Number of rows currently visible in the table
    pub fn visible_row_count(&self) -> usize {
        self.table.rows(self.view.records(), &self.registry).len()
    }

    /// Record under the table cursor
    pub fn current_connection(&self) -> Option<&ProviderConnection> {
        let rows = self.table.rows(self.view.records(), &self.registry);
        let uid = rows.get(self.table.cursor())?.uid;
        self.view.records().iter().find(|c| c.uid == uid)
    }

    pub fn cursor_up(&mut self) {
        let len = self.visible_row_count();
        self.table.cursor_up(len);
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_row_count();
        self.table.cursor_down(len);
    }

    pub fn toggle_selection(&mut self) {
        if let Some(uid) = self.current_connection().map(|c| c.uid.clone()) {
            self.table.toggle_selected(&uid);
        }
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.ui_state.search_active = true;
        self.ui_state.search_input = self.table.search().to_string();
    }

    /// Cancel search input and clear the filter
    pub fn cancel_search(&mut self) {
        self.ui_state.search_active = false;
        self.ui_state.search_input.clear();
        self.table.clear_search();
    }

    /// Close the input and keep the current filter
    pub fn apply_search(&mut self) {
        self.ui_state.search_active = false;
        self.table.set_search(self.ui_state.search_input.clone());
    }

    /// Add a character to search input; the table filters as you type
    pub fn search_input_char(&mut self, c: char) {
        self.ui_state.search_input.push(c);
        self.table.set_search(self.ui_state.search_input.clone());
    }

    pub fn search_input_backspace(&mut self) {
        self.ui_state.search_input.pop();
        self.table.set_search(self.ui_state.search_input.clone());
    }

    pub fn search_clear(&mut self) {
        self.ui_state.search_input.clear();
        self.table.clear_search();
    }

    // ------------------------------------------------------------------
    // Delete flow
    // ------------------------------------------------------------------

    /// Open the confirmation dialog for the row under the cursor
    pub fn request_delete_current(&mut self) {
        if let Some(conn) = self.current_connection().cloned() {
            self.deletes.request(&conn);
        }
    }

    /// Open the confirmation dialog for all selected rows
    pub fn request_delete_selected(&mut self) {
        let selected = self.table.selected_records(self.view.records());
        if selected.is_empty() {
            self.show_info("No connections selected".to_string());
            return;
        }
        self.deletes.request_bulk(&selected);
    }

    /// Close the dialog and return the deletes to run
    pub fn confirm_delete(&mut self) -> Option<DeleteBatch> {
        let batch = self.deletes.confirm()?;
        for target in &batch.targets {
            if let Some(uid) = self
                .view
                .records()
                .iter()
                .find(|c| c.name == target.name && c.namespace == target.namespace)
                .map(|c| c.uid.clone())
            {
                if self.table.is_selected(&uid) {
                    self.table.toggle_selected(&uid);
                }
            }
        }
        Some(batch)
    }

    pub fn cancel_delete(&mut self) {
        self.deletes.cancel();
    }

    // ------------------------------------------------------------------
    // Navigation requests
    // ------------------------------------------------------------------

    /// Hand a navigation request to the host; the terminal shows its target
    pub fn request_navigation(&mut self, request: NavigationRequest) {
        let target = match &self.console_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), request.path()),
            None => request.path().to_string(),
        };
        self.show_info(format!("Create connection in the console: {}", target));
    }
}
