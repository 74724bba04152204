use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{
    AdminAllowlist, AdminConfig, Category, Hub, HubConfig, Item, NavigationTree, Session,
    SubCategory,
};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Two categories:
/// - `a` "Alpha" (public) with a public direct item and a private
///   sub-category `a1` "Alpha One"
/// - `b` "Beta" (private) with one item
pub fn scenario_tree() -> NavigationTree {
    NavigationTree::new(vec![
        Category::new("a", "Alpha")
            .with_items(vec![Item::new("public", "Public tool", "https://tool.example")])
            .with_sub_categories(vec![
                SubCategory::new("a1", "Alpha One")
                    .private()
                    .with_items(vec![Item::new("s", "Secret notes", "https://notes.example")]),
            ]),
        Category::new("b", "Beta")
            .private()
            .with_items(vec![Item::new("b1", "Roadmap", "https://roadmap.example")]),
    ])
}

/// A hub rooted nowhere in particular, titled "Test Hub".
pub fn hub_with_tree(tree: NavigationTree) -> Hub {
    let mut config = HubConfig::default();
    config.site.title = "Test Hub".into();
    Hub {
        navigation_path: PathBuf::from("/tmp/test-navhub/navigation.json"),
        config,
        tree,
    }
}

/// Build an App over `tree`; `octocat` is the only admin.
pub fn app_with_tree(tree: NavigationTree, session: Option<Session>) -> App {
    let admins = AdminAllowlist::resolve(
        &AdminConfig {
            owner: Some("octocat".into()),
            users: vec![],
        },
        None,
        None,
    );
    App::new(hub_with_tree(tree), session, admins)
}
