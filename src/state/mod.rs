//! Application state module

mod app_state;
pub mod forms;
pub mod options;

pub use app_state::*;
