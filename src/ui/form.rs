//! Demo request form rendering

use super::attachments::draw_chip_row;
use super::field_renderer::{draw_checkbox, draw_field};
use crate::app::App;
use crate::state::FocusTarget;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form: one chunk per focusable element, top to bottom.
///
/// The layout mirrors the focus order, so the identifying fields drop
/// out of the screen as soon as a file is attached.
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let order = app.focus_order();

    let constraints: Vec<Constraint> = order
        .iter()
        .map(|target| match target {
            FocusTarget::Field(field) if field.is_multiline() => Constraint::Min(5),
            FocusTarget::Field(field) if field.is_checkbox() => Constraint::Length(1),
            FocusTarget::Field(_) => Constraint::Length(3),
            FocusTarget::Attachments => {
                Constraint::Length(app.attachments.len() as u16 + 2)
            }
            FocusTarget::Submit => Constraint::Length(3),
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (idx, target) in order.iter().enumerate() {
        let is_active = idx == app.state.focus_index;
        match target {
            FocusTarget::Field(field) if field.is_checkbox() => {
                let checked = app.controller.form().flag(*field).unwrap_or(false);
                draw_checkbox(frame, chunks[idx], field.label(), checked, is_active);
            }
            FocusTarget::Field(field) => {
                let value = app.controller.form().text(*field).unwrap_or("");
                draw_field(
                    frame,
                    chunks[idx],
                    field.label(),
                    value,
                    is_active,
                    field.is_multiline(),
                );
            }
            FocusTarget::Attachments => {
                draw_chip_row(frame, chunks[idx], app, is_active);
            }
            FocusTarget::Submit => {
                draw_submit_button(frame, chunks[idx], app, is_active);
            }
        }
    }
}

fn draw_submit_button(frame: &mut Frame, area: Rect, app: &App, is_active: bool) {
    let label = if app.state.is_submitting {
        "Submitting..."
    } else {
        "Submit"
    };

    // Greyed out while a submission is in flight
    let style = if app.state.is_submitting {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_active && !app.state.is_submitting {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .centered()
        .block(block);
    frame.render_widget(button, area);
}
