//! Reusable UI components

mod button;
mod dialog;
mod file_picker;

pub use button::{render_button, render_submit_button, BUTTON_HEIGHT};
pub use dialog::render_error_dialog;
pub use file_picker::render_file_picker;
