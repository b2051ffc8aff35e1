//! Form views and the field renderer

mod field_renderer;
mod patient_form;
mod register_form;

pub use register_form::draw_gender_radio;

pub(super) use patient_form::draw as draw_patient_form;
pub(super) use register_form::draw as draw_register_form;
