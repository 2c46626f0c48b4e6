mod confirm_dialog;
mod connection_table;
mod context_list;
mod help_overlay;
mod status_bar;

pub use confirm_dialog::ConfirmDialog;
pub use connection_table::ConnectionTableView;
pub use context_list::ContextList;
pub use help_overlay::HelpOverlay;
pub use status_bar::{StatusBar, connection_hints, list_nav_hints};
