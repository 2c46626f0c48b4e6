use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use connscope_core::Column;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    ListNavigation,
    Connections,
    SearchInput,
    Confirm,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::new(KeyCode::Esc), Action::GoBack);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        bindings.insert(KeyContext::Global, global);

        // Context list bindings
        let mut list_nav = HashMap::new();
        list_nav.insert(KeyBinding::new(KeyCode::Char('j')), Action::ListDown);
        list_nav.insert(KeyBinding::new(KeyCode::Down), Action::ListDown);
        list_nav.insert(KeyBinding::new(KeyCode::Char('k')), Action::ListUp);
        list_nav.insert(KeyBinding::new(KeyCode::Up), Action::ListUp);
        list_nav.insert(KeyBinding::new(KeyCode::Enter), Action::ListSelect);
        bindings.insert(KeyContext::ListNavigation, list_nav);

        // Connections table bindings
        let mut table = HashMap::new();
        table.insert(KeyBinding::new(KeyCode::Char('j')), Action::ListDown);
        table.insert(KeyBinding::new(KeyCode::Down), Action::ListDown);
        table.insert(KeyBinding::new(KeyCode::Char('k')), Action::ListUp);
        table.insert(KeyBinding::new(KeyCode::Up), Action::ListUp);
        table.insert(KeyBinding::new(KeyCode::Char('1')), Action::SortBy(Column::Name));
        table.insert(KeyBinding::new(KeyCode::Char('2')), Action::SortBy(Column::Provider));
        table.insert(KeyBinding::new(KeyCode::Char('3')), Action::SortBy(Column::Namespace));
        table.insert(KeyBinding::new(KeyCode::Char('/')), Action::OpenSearch);
        table.insert(KeyBinding::new(KeyCode::Char(' ')), Action::ToggleSelection);
        table.insert(KeyBinding::new(KeyCode::Char('d')), Action::DeleteConnection);
        table.insert(KeyBinding::new(KeyCode::Delete), Action::DeleteConnection);
        table.insert(KeyBinding::shift(KeyCode::Char('D')), Action::DeleteSelected);
        table.insert(KeyBinding::new(KeyCode::Char('a')), Action::AddConnection);
        table.insert(KeyBinding::new(KeyCode::Char('r')), Action::Refresh);
        table.insert(KeyBinding::new(KeyCode::Char('x')), Action::DismissNotice);
        bindings.insert(KeyContext::Connections, table);

        // Search input bindings (when search bar is active)
        let mut search = HashMap::new();
        search.insert(KeyBinding::new(KeyCode::Enter), Action::ApplySearch);
        search.insert(KeyBinding::new(KeyCode::Esc), Action::CloseSearch);
        search.insert(KeyBinding::new(KeyCode::Backspace), Action::SearchBackspace);
        search.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::SearchClear);
        search.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CloseSearch);
        bindings.insert(KeyContext::SearchInput, search);

        // Confirmation dialog bindings
        let mut confirm = HashMap::new();
        confirm.insert(KeyBinding::new(KeyCode::Char('y')), Action::ConfirmDelete);
        confirm.insert(KeyBinding::new(KeyCode::Enter), Action::ConfirmDelete);
        confirm.insert(KeyBinding::new(KeyCode::Char('n')), Action::CancelDelete);
        confirm.insert(KeyBinding::new(KeyCode::Esc), Action::CancelDelete);
        confirm.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CancelDelete);
        bindings.insert(KeyContext::Confirm, confirm);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|b| b.get(&binding))
        {
            return Some(action.clone());
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event in search input mode
    /// Returns Some(Action) for special keys, SearchInput for regular characters
    pub fn get_search_input_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(action) = self
            .bindings
            .get(&KeyContext::SearchInput)
            .and_then(|b| b.get(&binding))
        {
            return Some(action.clone());
        }

        if let KeyCode::Char(c) = key.code {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                return Some(Action::SearchInput(c));
            }
        }

        None
    }

    /// Handle key event while the confirmation dialog is open.
    /// Only dialog keys are accepted so nothing behind it can be triggered.
    pub fn get_confirm_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);
        self.bindings
            .get(&KeyContext::Confirm)?
            .get(&binding)
            .cloned()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_context_binding_wins_over_global() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Connections, &key(KeyCode::Char('d'))),
            Some(Action::DeleteConnection)
        );
        assert_eq!(
            bindings.get_action(KeyContext::Connections, &key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_sort_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Connections, &key(KeyCode::Char('2'))),
            Some(Action::SortBy(Column::Provider))
        );
    }

    #[test]
    fn test_bulk_delete_needs_shift() {
        let bindings = KeyBindings::new();
        let event = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            bindings.get_action(KeyContext::Connections, &event),
            Some(Action::DeleteSelected)
        );
    }

    #[test]
    fn test_search_input_passes_characters() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_search_input_action(&key(KeyCode::Char('q'))),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(
            bindings.get_search_input_action(&key(KeyCode::Enter)),
            Some(Action::ApplySearch)
        );
    }

    #[test]
    fn test_confirm_dialog_swallows_other_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_confirm_action(&key(KeyCode::Char('y'))),
            Some(Action::ConfirmDelete)
        );
        assert_eq!(
            bindings.get_confirm_action(&key(KeyCode::Esc)),
            Some(Action::CancelDelete)
        );
        assert_eq!(bindings.get_confirm_action(&key(KeyCode::Char('d'))), None);
        assert_eq!(bindings.get_confirm_action(&key(KeyCode::Char('q'))), None);
    }
}
