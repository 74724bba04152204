use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::search::CategoryMatch;
use crate::tui::app::App;

use super::item_spans;

/// Number of lines [`render_results_view`] produces for `results`
pub fn line_count(results: &[CategoryMatch]) -> usize {
    let blanks = results.len().saturating_sub(1);
    let rows: usize = results
        .iter()
        .map(|m| 1 + m.items.len() + m.sub_categories.iter().map(|s| 1 + s.items.len()).sum::<usize>())
        .sum();
    blanks + rows
}

/// Render search results grouped by category, with the query highlighted.
///
/// Both direct-item matches and sub-category matches are shown here, unlike
/// the tree view.
pub fn render_results_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let results = app.search_results();

    if results.is_empty() {
        let line = Line::from(Span::styled(
            format!(" No matches for \"{}\"", app.query().trim()),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let search_re = app.active_search_re();
    let heading = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let sub_heading = Style::default()
        .fg(app.theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let count_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    for (i, m) in results.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", m.category.title), heading),
            Span::styled(format!("  {}", m.match_count()), count_style),
        ]));
        for item in &m.items {
            lines.push(Line::from(item_spans(&app.theme, item, 3, search_re.as_ref())));
        }
        for sub in &m.sub_categories {
            lines.push(Line::from(Span::styled(
                format!("   {}", sub.sub_category.title),
                sub_heading,
            )));
            for item in &sub.items {
                lines.push(Line::from(item_spans(&app.theme, item, 5, search_re.as_ref())));
            }
        }
    }

    // Clamp so at least the last line stays visible
    let skip = app.results_scroll.min(lines.len().saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;
    use crate::tui::render::test_helpers::*;

    fn results_text(app: &App) -> String {
        render_to_string(TERM_W, 12, |frame, area| {
            render_results_view(frame, app, area);
        })
    }

    #[test]
    fn results_grouped_by_category() {
        let mut app = app_with_tree(scenario_tree(), Some(Session::for_user("alice")));
        app.set_query("o");
        let output = results_text(&app);
        // "Public tool" is a direct item, shown even though the tree view shadows it
        assert!(output.contains(" Alpha  2"));
        assert!(output.contains("   Public tool"));
        assert!(output.contains("   Alpha One"));
        assert!(output.contains("     Secret notes"));
        assert!(output.contains(" Beta  1"));
    }

    #[test]
    fn anonymous_results_exclude_private() {
        let mut app = app_with_tree(scenario_tree(), None);
        app.set_query("secret");
        assert_eq!(results_text(&app), " No matches for \"secret\"");
    }

    #[test]
    fn scroll_skips_lines() {
        let mut app = app_with_tree(scenario_tree(), Some(Session::for_user("alice")));
        app.set_query("o");
        app.scroll_results(1);
        let output = results_text(&app);
        assert!(output.starts_with("   Public tool"));

        app.scroll_results(100);
        let output = results_text(&app);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn line_count_matches_rendered_lines() {
        let mut app = app_with_tree(scenario_tree(), Some(Session::for_user("alice")));
        app.set_query("o");
        assert_eq!(line_count(app.search_results()), 7);
        assert_eq!(results_text(&app).lines().count(), 7);
        assert_eq!(line_count(&[]), 0);
    }
}
