//! Keybindings and user settings

mod keybindings;
mod settings;

pub use keybindings::{KeyBinding, KeyBindings, KeyContext};
pub use settings::{DEFAULT_POLL_INTERVAL_SECS, Settings};
