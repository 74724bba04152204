use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Category;
use crate::ops::sections::{SectionBody, section_body};
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::item_spans;

/// Render the viewer-scoped tree as category sections, scrolled so the
/// selected category is at the top.
pub fn render_content_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let categories = app.scoped_tree().categories();

    if categories.is_empty() {
        let line = Line::from(Span::styled(
            " No links",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut anchors: Vec<usize> = Vec::with_capacity(categories.len());
    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        anchors.push(lines.len());
        push_category_lines(&mut lines, &app.theme, category);
    }

    let skip = anchors.get(app.cursor).copied().unwrap_or(0);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().bg(bg)),
        area,
    );
}

fn heading_line<'a>(theme: &Theme, indent: usize, title: &str, private: bool, top: bool) -> Line<'a> {
    let bg = theme.background;
    let style = if top {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.text)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![
        Span::styled(" ".repeat(indent), Style::default().bg(bg)),
        Span::styled(title.to_string(), style),
    ];
    if private {
        spans.push(Span::styled(" \u{25C6}", Style::default().fg(theme.private).bg(bg)));
    }
    Line::from(spans)
}

/// One category section. Sub-categories replace the category's own items when
/// present.
fn push_category_lines<'a>(lines: &mut Vec<Line<'a>>, theme: &Theme, category: &Category) {
    lines.push(heading_line(theme, 1, &category.title, category.private, true));

    match section_body(category) {
        SectionBody::SubCategories(subs) => {
            for sub in subs {
                lines.push(heading_line(theme, 3, &sub.title, sub.private, false));
                for item in &sub.items {
                    lines.push(Line::from(item_spans(theme, item, 5, None)));
                }
            }
        }
        SectionBody::Items(items) if items.is_empty() => {
            lines.push(Line::from(Span::styled(
                "   (empty)",
                Style::default().fg(theme.dim).bg(theme.background),
            )));
        }
        SectionBody::Items(items) => {
            for item in items {
                lines.push(Line::from(item_spans(theme, item, 3, None)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, NavigationTree, Session, SubCategory};
    use crate::tui::render::test_helpers::*;

    fn content_text(app: &App) -> String {
        render_to_string(TERM_W, 12, |frame, area| {
            render_content_view(frame, app, area);
        })
    }

    #[test]
    fn anonymous_scenario() {
        let app = app_with_tree(scenario_tree(), None);
        let output = content_text(&app);
        assert_eq!(
            output,
            " Alpha\n   Public tool  https://tool.example"
        );
    }

    #[test]
    fn signed_in_scenario_uses_sub_categories() {
        let app = app_with_tree(scenario_tree(), Some(Session::for_user("alice")));
        let output = content_text(&app);
        assert!(output.contains("   Alpha One \u{25C6}"));
        assert!(output.contains("     Secret notes"));
        assert!(output.contains(" Beta \u{25C6}"));
        // Shadowed by the sub-category
        assert!(!output.contains("Public tool"));
    }

    #[test]
    fn selected_category_scrolls_to_top() {
        let mut app = app_with_tree(scenario_tree(), Some(Session::for_user("alice")));
        app.move_cursor(1);
        let output = content_text(&app);
        assert!(output.starts_with(" Beta"));
        assert!(!output.contains("Alpha"));
    }

    #[test]
    fn empty_states() {
        let app = app_with_tree(NavigationTree::default(), None);
        assert_eq!(content_text(&app), " No links");

        let tree = NavigationTree::new(vec![Category::new("e", "Empty")]);
        let app = app_with_tree(tree, None);
        assert_eq!(content_text(&app), " Empty\n   (empty)");
    }

    #[test]
    fn descriptions_render_inline() {
        let tree = NavigationTree::new(vec![Category::new("d", "Docs").with_sub_categories(vec![
            SubCategory::new("web", "Web").with_items(vec![
                Item::new("mdn", "MDN", "https://developer.mozilla.org")
                    .with_description("Web docs"),
            ]),
        ])]);
        let app = app_with_tree(tree, None);
        let output = content_text(&app);
        assert!(output.contains("     MDN  Web docs  https://developer.mozilla.org"));
    }
}
