use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

/// Render the category index. Lists exactly what the viewer-scoped tree holds;
/// the selected category is the one the content view scrolls to.
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let private_style = Style::default().fg(app.theme.private).bg(bg);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        " Categories",
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];
    let mut cursor_line = 0;

    for (i, category) in app.scoped_tree().categories().iter().enumerate() {
        let is_cursor = i == app.cursor;
        if is_cursor {
            cursor_line = lines.len();
        }
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let marker = if is_cursor { "\u{25B8} " } else { "  " };
        let private_width = if category.private { 2 } else { 0 };
        let budget = width.saturating_sub(3 + private_width);

        let mut spans = vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(
                fit_to_width(&category.title, budget),
                Style::default()
                    .fg(if is_cursor { app.theme.text_bright } else { app.theme.text })
                    .bg(row_bg),
            ),
        ];
        if category.private {
            spans.push(Span::styled(" \u{25C6}", private_style.bg(row_bg)));
        }
        lines.push(Line::from(spans));

        for sub in &category.sub_categories {
            let private_width = if sub.private { 2 } else { 0 };
            let budget = width.saturating_sub(5 + private_width);
            let mut spans = vec![
                Span::styled("     ", Style::default().bg(bg)),
                Span::styled(
                    fit_to_width(&sub.title, budget),
                    Style::default().fg(app.theme.dim).bg(bg),
                ),
            ];
            if sub.private {
                spans.push(Span::styled(" \u{25C6}", private_style));
            }
            lines.push(Line::from(spans));
        }
    }

    // Keep the cursor row on screen
    let height = inner.height as usize;
    let skip = (cursor_line + 1).saturating_sub(height);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(
        Paragraph::new(visible).style(Style::default().bg(bg)),
        inner,
    );
}
