use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // j/k move the results view while a query is active, the category cursor otherwise
    let searching = app.is_searching();

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }

        KeyCode::Char('/') => {
            app.mode = Mode::Search;
        }

        KeyCode::Tab | KeyCode::Char('s') => {
            app.toggle_sidebar();
        }

        KeyCode::Char('j') | KeyCode::Down => {
            if searching {
                app.scroll_results(1);
            } else {
                app.move_cursor(1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if searching {
                app.scroll_results(-1);
            } else {
                app.move_cursor(-1);
            }
        }
        KeyCode::Char('g') | KeyCode::Home => {
            if searching {
                app.results_scroll = 0;
            } else {
                app.cursor = 0;
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if !searching {
                app.move_cursor(isize::MAX);
            }
        }

        KeyCode::Char('r') => match app.reload_from_disk() {
            Ok(()) => app.status_message = Some("reloaded navigation data".into()),
            Err(e) => {
                warn!(error = %e, "manual reload failed");
                app.status_message = Some(format!("reload failed: {}", e));
            }
        },

        // Esc backs out one layer: active query first, then the sidebar
        KeyCode::Esc => {
            if searching {
                app.clear_query();
            } else if app.sidebar_open {
                app.close_sidebar();
            }
        }

        _ => {}
    }
}
