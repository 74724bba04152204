use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::io::config_io;
use crate::io::hub_io::{self, HubError};
use crate::io::watcher::{FileEvent, NavigationWatcher};
use crate::model::{AdminAllowlist, Category, Hub, NavigationTree, Session, ViewerIdentity};
use crate::ops::search::{CategoryMatch, Query, search, total_matches};
use crate::ops::visibility::{ScopedTree, filter};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box
    Search,
}

/// Main application state.
///
/// Holds the raw inputs (tree, session, query) and the two derived views.
/// Every setter that changes an input recomputes whatever depends on it;
/// nothing else mutates the derived fields.
pub struct App {
    pub hub: Hub,
    session: Option<Session>,
    viewer: ViewerIdentity,
    admins: AdminAllowlist,
    scoped: ScopedTree,
    query: String,
    results: Vec<CategoryMatch>,
    pub mode: Mode,
    pub theme: Theme,
    /// Side panel visibility. Purely presentational.
    pub sidebar_open: bool,
    /// Selected category in the scoped tree
    pub cursor: usize,
    /// First visible line of the search results
    pub results_scroll: usize,
    pub show_key_hints: bool,
    /// One-shot message for the status row
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(hub: Hub, session: Option<Session>, admins: AdminAllowlist) -> Self {
        let viewer = ViewerIdentity::from_session(session.as_ref());
        let theme = Theme::from_config(&hub.config.ui);
        let sidebar_open = hub.config.ui.sidebar_open;
        let show_key_hints = hub.config.ui.show_key_hints;
        let scoped = filter(&hub.tree, viewer);

        App {
            hub,
            session,
            viewer,
            admins,
            scoped,
            query: String::new(),
            results: Vec::new(),
            mode: Mode::Navigate,
            theme,
            sidebar_open,
            cursor: 0,
            results_scroll: 0,
            show_key_hints,
            status_message: None,
            should_quit: false,
        }
    }

    // -----------------------------------------------------------------------
    // Derived data
    // -----------------------------------------------------------------------

    /// The raw, unfiltered tree. Rendering must go through [`App::scoped_tree`].
    pub fn raw_tree(&self) -> &NavigationTree {
        &self.hub.tree
    }

    /// The tree the current viewer may see
    pub fn scoped_tree(&self) -> &ScopedTree {
        &self.scoped
    }

    /// Results for the current query; empty when no search is active
    pub fn search_results(&self) -> &[CategoryMatch] {
        &self.results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-blank query is active. Decided from the query itself,
    /// since an empty result list means either "no search" or "no matches".
    pub fn is_searching(&self) -> bool {
        Query::parse(&self.query).is_some()
    }

    pub fn match_count(&self) -> usize {
        total_matches(&self.results)
    }

    pub fn viewer(&self) -> ViewerIdentity {
        self.viewer
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.username.as_deref())
    }

    /// Editing-surface capability. Independent of private-link visibility.
    pub fn is_admin(&self) -> bool {
        self.admins.is_admin(self.username())
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.scoped.categories().get(self.cursor)
    }

    /// Case-insensitive literal regex for highlighting the active query
    pub fn active_search_re(&self) -> Option<Regex> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(trimmed))).ok()
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Replace the raw tree (e.g. after a reload) and recompute everything.
    pub fn set_tree(&mut self, tree: NavigationTree) {
        self.hub.tree = tree;
        self.rescope();
    }

    /// Replace the session (sign in / sign out) and recompute everything.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.viewer = ViewerIdentity::from_session(session.as_ref());
        self.session = session;
        self.rescope();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.research();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.research();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.research();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.research();
    }

    /// Re-read the navigation file from disk.
    pub fn reload_from_disk(&mut self) -> Result<(), HubError> {
        hub_io::reload_navigation(&mut self.hub)?;
        self.rescope();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Transient UI state
    // -----------------------------------------------------------------------

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Move the category cursor, clamped to the scoped tree.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.scoped.categories().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Scroll the results view, keeping at least the last line on screen.
    pub fn scroll_results(&mut self, delta: isize) {
        let max = render::results_view::line_count(&self.results).saturating_sub(1);
        self.results_scroll = self.results_scroll.saturating_add_signed(delta).min(max);
    }

    // -----------------------------------------------------------------------
    // Recomputation
    // -----------------------------------------------------------------------

    fn rescope(&mut self) {
        self.scoped = filter(&self.hub.tree, self.viewer);
        let len = self.scoped.categories().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.research();
    }

    fn research(&mut self) {
        self.results = search(&self.scoped, &self.query);
        self.results_scroll = 0;
    }
}

/// Run the TUI application
pub fn run(hub_dir: Option<&Path>, session: Option<Session>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match hub_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = hub_io::discover_hub(&start)?;
    let hub = hub_io::load_hub(&root)?;
    let admins = config_io::admin_allowlist(&hub.config);

    // A watcher failure only costs live reload
    let watcher = match NavigationWatcher::start(&hub.navigation_path) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "file watcher unavailable; live reload disabled");
            None
        }
    };

    let mut app = App::new(hub, session, admins);
    info!(authenticated = app.viewer().authenticated, "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&NavigationWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let changed = watcher.map(|w| w.poll()).unwrap_or_default();
        for FileEvent::Changed(path) in &changed {
            debug!(path = %path.display(), "reloading after change");
        }
        if !changed.is_empty() {
            match app.reload_from_disk() {
                Ok(()) => app.status_message = Some("reloaded navigation data".into()),
                Err(e) => {
                    warn!(error = %e, "reload failed");
                    app.status_message = Some(format!("reload failed: {}", e));
                }
            }
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::sections::{SectionBody, section_body};
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn anonymous_app() -> App {
        app_with_tree(scenario_tree(), None)
    }

    fn signed_in_app() -> App {
        app_with_tree(scenario_tree(), Some(Session::for_user("mallory")))
    }

    // --- Scoped tree ---

    #[test]
    fn anonymous_sees_public_only() {
        let app = anonymous_app();
        let ids: Vec<&str> = app
            .scoped_tree()
            .categories()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
        assert!(app.scoped_tree().categories()[0].sub_categories.is_empty());
        // The raw tree is untouched
        assert_eq!(app.raw_tree().navigation_items.len(), 2);
    }

    #[test]
    fn any_session_sees_private() {
        let app = signed_in_app();
        assert_eq!(app.scoped_tree().tree(), app.raw_tree());
    }

    #[test]
    fn session_change_recomputes_scope_and_results() {
        let mut app = signed_in_app();
        app.set_query("secret");
        assert_eq!(app.match_count(), 1);

        app.set_session(None);
        assert!(!app.viewer().authenticated);
        assert_eq!(app.scoped_tree().categories().len(), 1);
        assert!(app.search_results().is_empty());
        // Query survives; only its results changed
        assert!(app.is_searching());
        assert_eq!(app.query(), "secret");

        app.set_session(Some(Session::default()));
        assert_eq!(app.match_count(), 1);
    }

    #[test]
    fn tree_change_recomputes() {
        let mut app = anonymous_app();
        app.set_query("tool");
        assert_eq!(app.match_count(), 1);

        app.set_tree(NavigationTree::default());
        assert!(app.scoped_tree().categories().is_empty());
        assert!(app.search_results().is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn cursor_clamped_after_rescope() {
        let mut app = signed_in_app();
        app.move_cursor(1);
        assert_eq!(app.cursor, 1);
        app.set_session(None);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_category().map(|c| c.id.as_str()), Some("a"));
    }

    // --- Search ---

    #[test]
    fn search_as_you_type() {
        let mut app = signed_in_app();
        for c in "sec".chars() {
            app.push_query_char(c);
        }
        assert!(app.is_searching());
        assert_eq!(app.search_results().len(), 1);
        assert_eq!(app.search_results()[0].sub_categories[0].sub_category.id, "a1");

        app.pop_query_char();
        app.pop_query_char();
        app.pop_query_char();
        assert!(!app.is_searching());
        assert!(app.search_results().is_empty());
    }

    #[test]
    fn blank_query_is_not_a_search() {
        let mut app = signed_in_app();
        app.set_query("   ");
        assert!(!app.is_searching());
        assert!(app.search_results().is_empty());
        assert!(app.active_search_re().is_none());
    }

    #[test]
    fn no_matches_is_still_searching() {
        let mut app = signed_in_app();
        app.set_query("zzz");
        assert!(app.is_searching());
        assert!(app.search_results().is_empty());
    }

    #[test]
    fn clear_query_resets_scroll() {
        let mut app = signed_in_app();
        app.set_query("o");
        app.scroll_results(3);
        assert_eq!(app.results_scroll, 3);
        app.clear_query();
        assert_eq!(app.results_scroll, 0);
        assert_eq!(app.query(), "");
    }

    #[test]
    fn scroll_stops_at_last_result_line() {
        let mut app = signed_in_app();
        // Alpha heading, Public tool, Alpha One, Secret notes, blank, Beta heading, Roadmap
        app.set_query("o");
        app.scroll_results(100);
        assert_eq!(app.results_scroll, 6);
        app.scroll_results(-1);
        assert_eq!(app.results_scroll, 5);
        app.scroll_results(-100);
        assert_eq!(app.results_scroll, 0);

        app.set_query("zzz");
        app.scroll_results(5);
        assert_eq!(app.results_scroll, 0);
    }

    #[test]
    fn highlight_regex_is_literal() {
        let mut app = signed_in_app();
        app.set_query("c++ (");
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("learn C++ (fast)"));
    }

    // --- Sidebar ---

    #[test]
    fn sidebar_does_not_affect_derivations() {
        let mut app = signed_in_app();
        app.set_query("tool");
        let scoped = app.scoped_tree().clone();
        let results = app.search_results().to_vec();

        app.toggle_sidebar();
        assert!(app.sidebar_open);
        app.close_sidebar();
        assert!(!app.sidebar_open);
        app.open_sidebar();

        assert_eq!(app.scoped_tree(), &scoped);
        assert_eq!(app.search_results(), results.as_slice());
    }

    // --- Capabilities ---

    #[test]
    fn admin_is_separate_from_authentication() {
        let app = signed_in_app();
        assert!(app.viewer().authenticated);
        assert!(!app.is_admin());

        let app = app_with_tree(scenario_tree(), Some(Session::for_user("octocat")));
        assert!(app.is_admin());

        // Session without a username: authenticated, never admin
        let app = app_with_tree(scenario_tree(), Some(Session::default()));
        assert!(app.viewer().authenticated);
        assert!(!app.is_admin());
    }

    // --- Rendering precedence ---

    #[test]
    fn anonymous_view_of_mixed_category_falls_back_to_items() {
        // Once the private sub-category is filtered out, direct items render
        let app = anonymous_app();
        let a = &app.scoped_tree().categories()[0];
        assert!(matches!(section_body(a), SectionBody::Items(items) if items[0].id == "public"));

        let app = signed_in_app();
        let a = &app.scoped_tree().categories()[0];
        assert!(matches!(section_body(a), SectionBody::SubCategories(_)));
    }

    #[test]
    fn reload_from_disk_picks_up_changes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("navigation.json");
        std::fs::write(&path, r#"{"navigationItems":[{"id":"x","title":"X"}]}"#).unwrap();

        let mut hub = hub_with_tree(NavigationTree::default());
        hub.navigation_path = path.clone();
        let mut app = App::new(hub, None, AdminAllowlist::default());
        app.reload_from_disk().unwrap();
        assert_eq!(app.scoped_tree().categories()[0].id, "x");

        std::fs::write(&path, "not json").unwrap();
        assert!(app.reload_from_disk().is_err());
        // A failed reload keeps the previous tree
        assert_eq!(app.scoped_tree().categories()[0].id, "x");
    }
}
