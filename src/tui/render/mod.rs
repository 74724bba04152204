pub mod content_view;
pub mod header;
pub mod results_view;
pub mod sidebar;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use crate::model::Item;

use super::app::App;
use super::theme::Theme;

/// Sidebar width in columns, border included
pub const SIDEBAR_WIDTH: u16 = 26;

/// Main render function: lays out the screen and dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | body | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // body
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    let body = if app.sidebar_open {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(chunks[1]);
        sidebar::render_sidebar(frame, app, cols[0]);
        cols[1]
    } else {
        chunks[1]
    };

    // A blank query is "not searching", so the full tree shows instead of
    // an empty result list
    if app.is_searching() {
        results_view::render_results_view(frame, app, body);
    } else {
        content_view::render_content_view(frame, app, body);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Spans for one link row: title, private marker, description, href.
/// Shared by the tree and results views so both read the same.
pub(super) fn item_spans<'a>(
    theme: &Theme,
    item: &Item,
    indent: usize,
    search_re: Option<&Regex>,
) -> Vec<Span<'a>> {
    let bg = theme.background;
    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let title_style = if item.enabled {
        Style::default().fg(theme.text_bright).bg(bg)
    } else {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    };

    let mut spans = vec![Span::styled(" ".repeat(indent), Style::default().bg(bg))];
    push_highlighted_spans(&mut spans, &item.title, title_style, highlight, search_re);
    if item.private {
        spans.push(Span::styled(" \u{25C6}", Style::default().fg(theme.private).bg(bg)));
    }
    if let Some(desc) = item.description.as_deref().filter(|d| !d.is_empty()) {
        spans.push(Span::styled("  ", Style::default().bg(bg)));
        push_highlighted_spans(
            &mut spans,
            desc,
            Style::default().fg(theme.text).bg(bg),
            highlight,
            search_re,
        );
    }
    if !item.href.is_empty() {
        spans.push(Span::styled(
            format!("  {}", item.href),
            Style::default().fg(theme.link).bg(bg),
        ));
    }
    spans
}
