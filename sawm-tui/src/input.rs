use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.ramadan_timetable`(...) for the selected city and country
    FetchTimings,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Char, Down, Enter, Esc, Left, PageDown, PageUp, Right, Tab, Up};

    // Global shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.modifiers.is_empty() {
        match key.code {
            Char('q') => return Action::Quit,
            Char('d') if app.screen != Screen::Duas => {
                app.open_duas();
                return Action::None;
            }
            _ => {}
        }
    }

    // Ignore keys while a request is running
    if app.is_loading {
        return Action::None;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::LocalitySelect => match key.code {
            Up | Char('k') => app.move_selection(false),
            Down | Char('j') => app.move_selection(true),
            Tab | BackTab | Left | Right | Char('h' | 'l') => app.toggle_focus(),
            Enter | Char('g') => action = Action::FetchTimings,
            _ => {}
        },

        Screen::Timetable => match key.code {
            Up | Char('k') => app.move_selection(false),
            Down | Char('j') => app.move_selection(true),
            Char('r') => action = Action::FetchTimings,
            Left | Esc | Char('b') => app.screen = Screen::LocalitySelect,
            _ => {}
        },

        Screen::Duas => match key.code {
            Up | Char('k') => app.move_selection(false),
            Down | Char('j') => app.move_selection(true),
            Enter | Char(' ') => app.toggle_current_dua(),
            PageDown => app.scroll_duas(true),
            PageUp => app.scroll_duas(false),
            Left | Esc | Char('b' | 'd') => app.close_duas(),
            _ => {}
        },
    }
    action
}
