//! UI module for rendering the TUI

mod confirmation;
pub mod components;
pub mod forms;
mod layout;

use crate::state::{AppState, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, show_route: bool) {
    let area = frame.area();
    let content_area = layout::create_layout(area);

    match &state.current_view {
        View::Welcome => forms::draw_patient_form(frame, content_area, &state.patient_form),
        View::Register => forms::draw_register_form(frame, content_area, &state.register_form),
        View::Confirmation => confirmation::draw(frame, content_area, state),
    }

    layout::draw_status_bar(frame, state, show_route);

    // Overlays: file browser beneath the error dialog
    if let Some(browser) = &state.file_browser {
        components::render_file_picker(frame, browser);
    }
    if let Some(message) = &state.error_message {
        components::render_error_dialog(frame, message);
    }
}
