use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    /// Follow the call-to-action on the landing view
    Select,
    /// Return to the landing view
    Back,
    StartSearch,
    CycleSort,
    OpenImage,
    /// Carousel forward on the landing view, next card in the grid otherwise
    NextItem,
    PrevItem,
    Help,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Map a key event to an action for the current mode
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::Search { .. } => return handle_input_mode(key),
        // Any key closes help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    let binding = KeyBinding::from_event(&key);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events while editing the search query
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}
