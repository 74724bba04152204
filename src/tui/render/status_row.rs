use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Right-align `hint` after `spans` if it fits
fn push_hint<'a>(spans: &mut Vec<Span<'a>>, hint: String, width: usize, app: &App) {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
}

fn match_summary(app: &App) -> String {
    match app.match_count() {
        1 => "1 match".to_string(),
        n => format!("{} matches", n),
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            let mut spans = Vec::new();
            if let Some(ref msg) = app.status_message {
                spans.push(Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.text).bg(bg),
                ));
            } else if app.is_searching() {
                // Active query shown dimmed
                spans.push(Span::styled(
                    format!("/{}  {}", app.query(), match_summary(app)),
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
                push_hint(&mut spans, "Esc clear".to_string(), width, app);
            } else if app.show_key_hints {
                push_hint(
                    &mut spans,
                    "/ search  Tab sidebar  j/k move  r reload  q quit".to_string(),
                    width,
                    app,
                );
            }
            Line::from(spans)
        }
        Mode::Search => {
            // Search prompt: /query▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.query()),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            ];
            let hint = if app.is_searching() {
                format!("{}  Enter done  Esc cancel", match_summary(app))
            } else {
                "Enter done  Esc cancel".to_string()
            };
            push_hint(&mut spans, hint, width, app);
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
