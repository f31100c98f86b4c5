//! Attachment chips and the attach-file prompt

use crate::app::App;
use crate::state::{format_size, ALLOWED_EXTENSIONS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw one chip per attachment, with the selected one highlighted
/// while the row is focused
pub fn draw_chip_row(frame: &mut Frame, area: Rect, app: &App, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines: Vec<Line> = app
        .attachments
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let selected = is_active && idx == app.state.selected_attachment;
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut spans = vec![Span::styled(
                format!("{} ({})", record.name, format_size(record.size)),
                style,
            )];
            if selected {
                spans.push(Span::styled(
                    "  x: remove",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .title(format!(" Attachments ({}) ", app.attachments.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the modal path prompt over the form
pub fn draw_attach_prompt(frame: &mut Frame, app: &App) {
    let area = centered_rect(frame.area(), 60, 7);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(&app.state.attach_input, Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Allowed: .{}", ALLOWED_EXTENSIONS.join(" .")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " Enter: add | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(
            " Attach file (path) ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
