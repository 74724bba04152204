use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the header: site title and description on the left, viewer on the
/// right, separator below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title row
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_title_row(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1]);
}

fn viewer_label(app: &App) -> String {
    if !app.viewer().authenticated {
        return "anonymous".to_string();
    }
    let name = app.username().unwrap_or("signed in");
    if app.is_admin() {
        format!("{} \u{2605} admin", name)
    } else {
        name.to_string()
    }
}

fn render_title_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let label = viewer_label(app);
    let label_width = display_width(&label) + 1;
    // " ▶ " prefix takes 3 cells; the title wins over the viewer label
    let title_budget = width.saturating_sub(4);
    let title = truncate_to_width(&app.hub.config.site.title, title_budget);

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let mut used = 3 + display_width(&title);
    let show_label = used + label_width <= width;

    // The description fills whatever the title and label leave over
    let description = app.hub.config.site.description.trim();
    let room = width.saturating_sub(used + if show_label { label_width } else { 0 });
    if !description.is_empty() && room > 3 {
        let description = truncate_to_width(description, room - 3);
        used += 2 + display_width(&description);
        spans.push(Span::styled("  ", Style::default().bg(bg)));
        spans.push(Span::styled(description, Style::default().fg(app.theme.dim).bg(bg)));
    }

    if show_label {
        spans.push(Span::styled(
            " ".repeat(width - used - label_width),
            Style::default().bg(bg),
        ));
        let label_fg = if app.viewer().authenticated {
            app.theme.private
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(label, Style::default().fg(label_fg).bg(bg)));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
