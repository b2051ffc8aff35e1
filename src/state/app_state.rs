//! Application state definitions

use super::forms::{ConfigError, CustomRender, FileBrowser, FormModel};
use serde::{Deserialize, Serialize};

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// First wizard step: minimal user record
    #[default]
    Welcome,
    /// Full intake form for an existing user
    Register,
    /// Registration complete
    Confirmation,
}

/// View parameters for navigation. Only the backend id travels here;
/// personal fields stay inside the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub patient_id: Option<String>,
}

/// Render the route a view corresponds to, for the status bar and logs
pub fn route_path(view: &View, params: &ViewParams) -> String {
    match (view, params.patient_id.as_deref()) {
        (View::Welcome, _) => "/".to_string(),
        (View::Register, Some(id)) => format!("/patients/{id}/register"),
        (View::Confirmation, Some(id)) => format!("/patients/{id}/confirmation"),
        // Form views are unreachable without an id; fall back to the root
        (View::Register | View::Confirmation, None) => "/".to_string(),
    }
}

/// Minimal subset of fields the user-creation endpoint accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A created user record; the core only relies on the id being stable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: String,
}

/// The full intake payload submitted from the register step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub gender: String,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: String,
    pub current_medication: String,
    pub family_medical_history: String,
    pub past_medical_history: String,
    pub identification_type: String,
    pub identification_number: String,
    pub identification_document: String,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
}

impl PatientIntake {
    /// Snapshot the register form into the backend payload
    pub fn from_form(user_id: &str, form: &FormModel) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: form.text("name").to_string(),
            email: form.text("email").to_string(),
            phone: form.text("phone").to_string(),
            birth_date: form.text("birth_date").to_string(),
            gender: form.choice("gender").to_string(),
            address: form.text("address").to_string(),
            occupation: form.text("occupation").to_string(),
            emergency_contact_name: form.text("emergency_contact_name").to_string(),
            emergency_contact_phone: form.text("emergency_contact_phone").to_string(),
            primary_physician: form.choice("primary_physician").to_string(),
            insurance_provider: form.text("insurance_provider").to_string(),
            insurance_policy_number: form.text("insurance_policy_number").to_string(),
            allergies: form.text("allergies").to_string(),
            current_medication: form.text("current_medication").to_string(),
            family_medical_history: form.text("family_medical_history").to_string(),
            past_medical_history: form.text("past_medical_history").to_string(),
            identification_type: form.choice("identification_type").to_string(),
            identification_number: form.text("identification_number").to_string(),
            identification_document: form
                .file("identification_document")
                .and_then(|slot| slot.selected())
                .map(|f| f.path.display().to_string())
                .unwrap_or_default(),
            treatment_consent: form.checked("treatment_consent"),
            disclosure_consent: form.checked("disclosure_consent"),
            privacy_consent: form.checked("privacy_consent"),
        }
    }
}

/// Top-level mutable state of the application
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,
    /// One independent form instance per wizard step
    pub patient_form: FormModel,
    pub register_form: FormModel,
    pub backend_connected: bool,
    /// Modal submission error, if any
    pub error_message: Option<String>,
    /// Transient status-bar message
    pub status_message: Option<String>,
    /// Browse popup for the file-upload field, when open
    pub file_browser: Option<FileBrowser>,
}

impl AppState {
    pub fn new(gender_renderer: CustomRender) -> Result<Self, ConfigError> {
        Ok(Self {
            current_view: View::default(),
            view_params: ViewParams::default(),
            view_history: Vec::new(),
            patient_form: super::forms::patient_form()?,
            register_form: super::forms::register_form(gender_renderer)?,
            backend_connected: false,
            error_message: None,
            status_message: None,
            file_browser: None,
        })
    }

    /// Move to a view, remembering where we came from
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        self.view_history
            .push((self.current_view.clone(), self.view_params.clone()));
        self.current_view = view;
        self.view_params = params;
        tracing::debug!(route = %self.current_route(), "navigated");
    }

    pub fn go_back(&mut self) {
        if let Some((view, params)) = self.view_history.pop() {
            self.current_view = view;
            self.view_params = params;
        }
    }

    pub fn current_route(&self) -> String {
        route_path(&self.current_view, &self.view_params)
    }

    /// The form belonging to the current view, if it has one
    pub fn current_form_mut(&mut self) -> Option<&mut FormModel> {
        match self.current_view {
            View::Welcome => Some(&mut self.patient_form),
            View::Register => Some(&mut self.register_form),
            View::Confirmation => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormField;
    use ratatui::{layout::Rect, Frame};

    fn noop_render(_: &mut Frame, _: Rect, _: &FormField, _: bool) {}

    fn state() -> AppState {
        AppState::new(noop_render).unwrap()
    }

    mod routes {
        use super::*;

        #[test]
        fn test_welcome_route_is_root() {
            assert_eq!(route_path(&View::Welcome, &ViewParams::default()), "/");
        }

        #[test]
        fn test_register_route_carries_only_the_id() {
            let params = ViewParams {
                patient_id: Some("u1".to_string()),
            };
            assert_eq!(route_path(&View::Register, &params), "/patients/u1/register");
        }

        #[test]
        fn test_register_route_without_id_falls_back() {
            assert_eq!(route_path(&View::Register, &ViewParams::default()), "/");
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_navigate_pushes_history() {
            let mut state = state();
            state.navigate(
                View::Register,
                ViewParams {
                    patient_id: Some("u1".to_string()),
                },
            );
            assert_eq!(state.current_view, View::Register);
            assert_eq!(state.view_history.len(), 1);
            assert_eq!(state.current_route(), "/patients/u1/register");
        }

        #[test]
        fn test_go_back_restores_previous_view() {
            let mut state = state();
            state.navigate(
                View::Register,
                ViewParams {
                    patient_id: Some("u1".to_string()),
                },
            );
            state.go_back();
            assert_eq!(state.current_view, View::Welcome);
            assert!(state.view_params.patient_id.is_none());
        }

        #[test]
        fn test_go_back_on_empty_history_is_noop() {
            let mut state = state();
            state.go_back();
            assert_eq!(state.current_view, View::Welcome);
        }
    }

    mod intake_payload {
        use super::*;

        #[test]
        fn test_from_form_maps_fields() {
            let mut state = state();
            let form = &mut state.register_form;
            form.set_text("name", "Jane Doe");
            form.set_text("email", "jane@example.com");
            form.set_text("phone", "+14155552671");
            form.field_mut("gender")
                .unwrap()
                .set_choice(Some("female".to_string()));
            form.field_mut("treatment_consent").unwrap().toggle();

            let intake = PatientIntake::from_form("u1", form);
            assert_eq!(intake.user_id, "u1");
            assert_eq!(intake.name, "Jane Doe");
            assert_eq!(intake.gender, "female");
            assert!(intake.treatment_consent);
            assert!(!intake.privacy_consent);
            assert_eq!(intake.identification_document, "");
        }
    }
}
