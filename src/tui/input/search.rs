use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Search-as-you-type: every edit goes straight to the adapter, which
/// recomputes results.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search
        (_, KeyCode::Esc) => {
            app.clear_query();
            app.mode = Mode::Navigate;
        }

        // Keep the query, go back to browsing the results
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            app.pop_query_char();
        }

        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.clear_query();
        }

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.push_query_char(c);
        }

        _ => {}
    }
}
