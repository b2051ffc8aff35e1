//! Application controller: key handling and the submission flows

use crate::backend::IntakeBackend;
use crate::config::TuiConfig;
use crate::platform;
use crate::state::forms::{FieldKind, FileBrowser, PendingFile, SubmitError, SubmitGate};
use crate::state::{AppState, NewUser, PatientIntake, View, ViewParams};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// Main application struct, generic over the backend so the whole key and
/// submission flow is testable against a mock
pub struct App<B: IntakeBackend> {
    /// Current application state
    pub state: AppState,
    /// Backend for user creation and patient registration
    pub backend: B,
    /// Whether the app should quit
    quit: bool,
    /// Show the current route in the status bar
    pub show_route: bool,
}

impl<B: IntakeBackend> App<B> {
    /// Create a new App instance over an already-constructed backend
    pub async fn new(backend: B, config: &TuiConfig) -> Result<Self> {
        let mut state = AppState::new(crate::ui::forms::draw_gender_radio)?;
        state.backend_connected = backend.check_connection().await;
        Ok(Self {
            state,
            backend,
            quit: false,
            show_route: config.show_route.unwrap_or(false),
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event for the current view and overlays
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Modal error dialog swallows everything except dismissal
        if self.state.error_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.error_message = None;
            }
            return Ok(());
        }

        if self.state.file_browser.is_some() {
            self.handle_browser_key(key)?;
            return Ok(());
        }

        // Submit shortcut works anywhere inside a form view
        if key.modifiers.contains(platform::SUBMIT_MODIFIER)
            && key.code == KeyCode::Char('s')
        {
            self.submit_current().await?;
            return Ok(());
        }

        match self.state.current_view {
            View::Welcome | View::Register => self.handle_form_key(key).await?,
            View::Confirmation => self.handle_confirmation_key(key),
        }
        Ok(())
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+O opens the browse popup on a file-upload field
        if key.modifiers.contains(platform::SUBMIT_MODIFIER) && key.code == KeyCode::Char('o') {
            self.open_file_browser()?;
            return Ok(());
        }

        // Snapshot the focus state up front; each arm re-borrows the form
        let (on_submit, multiline, active_kind) = {
            let Some(form) = self.state.current_form_mut() else {
                return Ok(());
            };
            (
                form.on_submit_row(),
                form.active_is_multiline(),
                form.active_field().map(|f| f.config.kind),
            )
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.with_form(|f| f.next_field()),
            KeyCode::BackTab | KeyCode::Up => self.with_form(|f| f.prev_field()),
            KeyCode::Backspace => self.with_form(|f| f.backspace()),
            KeyCode::Left => self.with_form(|f| f.prev_choice()),
            KeyCode::Right => self.with_form(|f| f.next_choice()),
            KeyCode::Enter => {
                if on_submit {
                    self.submit_current().await?;
                } else if multiline {
                    self.with_form(|f| f.input_char('\n'));
                } else if active_kind == Some(FieldKind::FileUpload) {
                    self.confirm_typed_path();
                } else {
                    self.with_form(|f| f.next_field());
                }
            }
            KeyCode::Char(' ') => {
                if active_kind == Some(FieldKind::Checkbox) {
                    self.with_form(|f| f.toggle_active());
                } else {
                    self.with_form(|f| f.input_char(' '));
                }
            }
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                self.with_form(|f| f.input_char(c));
            }
            KeyCode::Esc => {
                if self.state.view_history.is_empty() {
                    self.quit = true;
                } else {
                    self.state.go_back();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn with_form(&mut self, op: impl FnOnce(&mut crate::state::forms::FormModel)) {
        if let Some(form) = self.state.current_form_mut() {
            op(form);
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            // Start a fresh registration
            KeyCode::Enter => {
                self.state.patient_form.reset();
                self.state.register_form.reset();
                self.state.view_history.clear();
                self.state.current_view = View::Welcome;
                self.state.view_params = ViewParams::default();
            }
            KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(browser) = self.state.file_browser.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => browser.next(),
            KeyCode::Up | KeyCode::Char('k') => browser.prev(),
            KeyCode::Enter => {
                match browser.descend() {
                    Ok(true) => return Ok(()),
                    Ok(false) => {}
                    Err(e) => {
                        self.state.status_message = Some(format!("Cannot open directory: {e}"));
                        return Ok(());
                    }
                }
                let picked = browser.selected_path().map(Path::to_path_buf);
                if let Some(path) = picked {
                    match PendingFile::from_path(&path) {
                        Ok(file) => {
                            if let Some(form) = self.state.current_form_mut() {
                                form.attach_file(file);
                            }
                            self.state.status_message = Some("File attached".to_string());
                        }
                        Err(e) => {
                            self.state.status_message =
                                Some(format!("Cannot attach file: {e}"));
                        }
                    }
                    self.state.file_browser = None;
                }
            }
            KeyCode::Esc => self.state.file_browser = None,
            _ => {}
        }
        Ok(())
    }

    fn active_is_upload(&mut self) -> bool {
        self.state
            .current_form_mut()
            .and_then(|form| form.active_field())
            .is_some_and(|f| f.config.kind == FieldKind::FileUpload)
    }

    /// Confirm the typed path of the active upload field
    fn confirm_typed_path(&mut self) {
        let Some(form) = self.state.current_form_mut() else {
            return;
        };
        match form.select_typed_file() {
            Some(Ok(())) => self.state.status_message = Some("File attached".to_string()),
            Some(Err(e)) => self.state.status_message = Some(format!("Cannot attach file: {e}")),
            None => {}
        }
    }

    fn open_file_browser(&mut self) -> Result<()> {
        if !self.active_is_upload() {
            return Ok(());
        }
        let start = self
            .state
            .current_form_mut()
            .and_then(|form| form.active_file_slot())
            .map(|slot| PathBuf::from(slot.input()))
            .filter(|p| p.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        match FileBrowser::open(&start) {
            Ok(browser) => self.state.file_browser = Some(browser),
            Err(e) => self.state.status_message = Some(format!("Cannot open {}: {e}", start.display())),
        }
        Ok(())
    }

    async fn submit_current(&mut self) -> Result<()> {
        match self.state.current_view {
            View::Welcome => self.submit_patient_form().await,
            View::Register => self.submit_register_form().await,
            View::Confirmation => Ok(()),
        }
    }

    /// Create the user record and advance to the register step. The backend
    /// is called exactly once per `Ready` gate.
    pub async fn submit_patient_form(&mut self) -> Result<()> {
        match self.state.patient_form.try_begin_submit() {
            SubmitGate::AlreadySubmitting | SubmitGate::Invalid => return Ok(()),
            SubmitGate::Ready => {}
        }

        let user = NewUser {
            name: self.state.patient_form.text("name").to_string(),
            email: self.state.patient_form.text("email").to_string(),
            phone: self.state.patient_form.text("phone").to_string(),
        };
        tracing::info!("creating user record");

        match self.backend.create_user(user.clone()).await {
            Ok(created) if !created.id.is_empty() => {
                self.state.patient_form.complete_success();
                // Carry the known values into the next step in-process; the
                // route only ever holds the id
                self.state.register_form.set_text("name", &user.name);
                self.state.register_form.set_text("email", &user.email);
                self.state.register_form.set_text("phone", &user.phone);
                self.state.navigate(
                    View::Register,
                    ViewParams {
                        patient_id: Some(created.id),
                    },
                );
            }
            Ok(_) => self.submission_failed(View::Welcome, SubmitError::MissingId),
            Err(e) => self.submission_failed(View::Welcome, SubmitError::Backend(e.to_string())),
        }
        Ok(())
    }

    /// Submit the full intake form and advance to the confirmation view
    pub async fn submit_register_form(&mut self) -> Result<()> {
        match self.state.register_form.try_begin_submit() {
            SubmitGate::AlreadySubmitting | SubmitGate::Invalid => return Ok(()),
            SubmitGate::Ready => {}
        }

        let Some(user_id) = self.state.view_params.patient_id.clone() else {
            self.submission_failed(View::Register, SubmitError::MissingId);
            return Ok(());
        };
        let intake = PatientIntake::from_form(&user_id, &self.state.register_form);
        tracing::info!("registering patient");

        match self.backend.register_patient(intake).await {
            Ok(id) => {
                self.state.register_form.complete_success();
                let patient_id = if id.is_empty() { user_id } else { id };
                self.state.navigate(
                    View::Confirmation,
                    ViewParams {
                        patient_id: Some(patient_id),
                    },
                );
            }
            Err(e) => self.submission_failed(View::Register, SubmitError::Backend(e.to_string())),
        }
        Ok(())
    }

    fn submission_failed(&mut self, view: View, error: SubmitError) {
        tracing::warn!(%error, "submission failed");
        self.state.error_message = Some(error.to_string());
        let form = match view {
            View::Welcome => &mut self.state.patient_form,
            View::Register | View::Confirmation => &mut self.state.register_form,
        };
        form.fail(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockIntakeBackend;
    use crate::state::forms::SubmitStatus;
    use crate::state::CreatedUser;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn app_with(mut backend: MockIntakeBackend) -> App<MockIntakeBackend> {
        backend.expect_check_connection().return_const(true);
        App::new(backend, &TuiConfig::default()).await.unwrap()
    }

    fn fill_patient_form(app: &mut App<MockIntakeBackend>) {
        app.state.patient_form.set_text("name", "Jane Doe");
        app.state.patient_form.set_text("email", "jane@example.com");
        app.state.patient_form.set_text("phone", "+14155552671");
    }

    fn fill_register_form(app: &mut App<MockIntakeBackend>) {
        let form = &mut app.state.register_form;
        form.set_text("name", "Jane Doe");
        form.set_text("email", "jane@example.com");
        form.set_text("phone", "+14155552671");
        form.set_text("birth_date", "03/14/1990");
        form.set_text("emergency_contact_phone", "+14155550000");
        form.field_mut("gender")
            .unwrap()
            .set_choice(Some("female".to_string()));
        form.field_mut("primary_physician")
            .unwrap()
            .set_choice(Some("green".to_string()));
        for name in ["treatment_consent", "disclosure_consent", "privacy_consent"] {
            form.field_mut(name).unwrap().toggle();
        }
    }

    mod patient_submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_submit_calls_backend_once_and_navigates() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_create_user()
                .times(1)
                .returning(|_| Ok(CreatedUser { id: "u1".to_string() }));
            let mut app = app_with(backend).await;
            fill_patient_form(&mut app);

            app.submit_patient_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Register);
            assert_eq!(app.state.current_route(), "/patients/u1/register");
            assert_eq!(app.state.patient_form.status(), &SubmitStatus::Succeeded);
        }

        #[tokio::test]
        async fn test_prefills_register_step_in_process() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_create_user()
                .times(1)
                .returning(|_| Ok(CreatedUser { id: "u1".to_string() }));
            let mut app = app_with(backend).await;
            fill_patient_form(&mut app);

            app.submit_patient_form().await.unwrap();

            assert_eq!(app.state.register_form.text("name"), "Jane Doe");
            assert_eq!(app.state.register_form.text("email"), "jane@example.com");
            assert_eq!(app.state.register_form.text("phone"), "+14155552671");
            // Personal fields never travel through the route
            assert!(!app.state.current_route().contains("Jane"));
        }

        #[tokio::test]
        async fn test_invalid_form_never_reaches_backend() {
            let mut backend = MockIntakeBackend::new();
            backend.expect_create_user().times(0);
            let mut app = app_with(backend).await;

            app.submit_patient_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Welcome);
            assert_eq!(
                app.state.patient_form.status(),
                &SubmitStatus::Failed(SubmitError::Validation)
            );
            assert!(app.state.patient_form.error("name").is_some());
        }

        #[tokio::test]
        async fn test_empty_id_fails_without_navigation() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_create_user()
                .times(1)
                .returning(|_| Ok(CreatedUser { id: String::new() }));
            let mut app = app_with(backend).await;
            fill_patient_form(&mut app);

            app.submit_patient_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Welcome);
            assert_eq!(
                app.state.patient_form.status(),
                &SubmitStatus::Failed(SubmitError::MissingId)
            );
            assert!(app.state.error_message.is_some());
        }

        #[tokio::test]
        async fn test_backend_error_surfaces_dialog_and_allows_retry() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_create_user()
                .times(2)
                .returning(|_| Err(anyhow::anyhow!("unavailable")));
            let mut app = app_with(backend).await;
            fill_patient_form(&mut app);

            app.submit_patient_form().await.unwrap();
            assert!(app.state.error_message.is_some());
            assert!(matches!(
                app.state.patient_form.status(),
                SubmitStatus::Failed(SubmitError::Backend(_))
            ));

            // Dismiss the dialog and resubmit
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.error_message.is_none());
            app.submit_patient_form().await.unwrap();
        }
    }

    mod register_submission {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn app_on_register(backend: MockIntakeBackend) -> App<MockIntakeBackend> {
            let mut app = app_with(backend).await;
            app.state.navigate(
                View::Register,
                ViewParams {
                    patient_id: Some("u1".to_string()),
                },
            );
            app
        }

        #[tokio::test]
        async fn test_valid_submit_reaches_confirmation() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_register_patient()
                .times(1)
                .returning(|intake| {
                    assert_eq!(intake.user_id, "u1");
                    assert_eq!(intake.gender, "female");
                    assert!(intake.treatment_consent);
                    Ok("u1".to_string())
                });
            let mut app = app_on_register(backend).await;
            fill_register_form(&mut app);

            app.submit_register_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Confirmation);
            assert_eq!(app.state.current_route(), "/patients/u1/confirmation");
        }

        #[tokio::test]
        async fn test_missing_consent_blocks_submission() {
            let mut backend = MockIntakeBackend::new();
            backend.expect_register_patient().times(0);
            let mut app = app_on_register(backend).await;
            fill_register_form(&mut app);
            // Withdraw one consent
            app.state
                .register_form
                .field_mut("privacy_consent")
                .unwrap()
                .toggle();

            app.submit_register_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Register);
            assert!(app.state.register_form.error("privacy_consent").is_some());
        }

        #[tokio::test]
        async fn test_backend_failure_keeps_register_view() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_register_patient()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("boom")));
            let mut app = app_on_register(backend).await;
            fill_register_form(&mut app);

            app.submit_register_form().await.unwrap();

            assert_eq!(app.state.current_view, View::Register);
            assert!(app.state.error_message.is_some());
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_routes_to_active_field() {
            let mut app = app_with(MockIntakeBackend::new()).await;
            for c in "Jane".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            assert_eq!(app.state.patient_form.text("name"), "Jane");
        }

        #[tokio::test]
        async fn test_tab_moves_focus() {
            let mut app = app_with(MockIntakeBackend::new()).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.patient_form.text("email"), "x");
        }

        #[tokio::test]
        async fn test_enter_on_submit_row_submits() {
            let mut backend = MockIntakeBackend::new();
            backend
                .expect_create_user()
                .times(1)
                .returning(|_| Ok(CreatedUser { id: "u1".to_string() }));
            let mut app = app_with(backend).await;
            fill_patient_form(&mut app);
            app.state.patient_form.prev_field(); // wrap to the submit row

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.current_view, View::Register);
        }

        #[tokio::test]
        async fn test_space_toggles_active_checkbox() {
            let mut app = app_with(MockIntakeBackend::new()).await;
            app.state.navigate(
                View::Register,
                ViewParams {
                    patient_id: Some("u1".to_string()),
                },
            );
            while !app
                .state
                .register_form
                .active_field()
                .is_some_and(|f| f.name() == "treatment_consent")
            {
                app.state.register_form.next_field();
            }
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(app.state.register_form.checked("treatment_consent"));
        }

        #[tokio::test]
        async fn test_confirmation_enter_starts_fresh() {
            let mut app = app_with(MockIntakeBackend::new()).await;
            fill_patient_form(&mut app);
            app.state.navigate(
                View::Confirmation,
                ViewParams {
                    patient_id: Some("u1".to_string()),
                },
            );

            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.current_view, View::Welcome);
            assert_eq!(app.state.patient_form.text("name"), "");
            assert!(app.state.view_history.is_empty());
        }

        #[tokio::test]
        async fn test_esc_on_welcome_quits() {
            let mut app = app_with(MockIntakeBackend::new()).await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.should_quit());
        }
    }
}
