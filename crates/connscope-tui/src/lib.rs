//! TUI components for connscope
//!
//! This crate provides the terminal user interface for connscope,
//! including state management, keybindings, settings, event handling,
//! and UI components.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, Notice, NoticeLevel, Screen, UiState};
pub use config::{KeyBinding, KeyBindings, KeyContext, Settings};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{
    ConfirmDialog, ConnectionTableView, ContextList, HelpOverlay, StatusBar, connection_hints,
    list_nav_hints,
};
pub use ui::screens::{ConnectionsScreen, ContextSelectScreen};
pub use ui::{Layout, Theme};
