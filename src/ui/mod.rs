//! UI module for rendering the TUI

mod attachments;
mod field_renderer;
mod form;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, content_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area);
    form::draw(frame, content_area, app);

    // Attach prompt renders as a modal over the form
    if app.state.current_view == View::AttachPrompt {
        attachments::draw_attach_prompt(frame, app);
    }

    layout::draw_status_bar(frame, app);
}
