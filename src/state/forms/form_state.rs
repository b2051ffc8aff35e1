//! Form state management and the submission state machine

use super::field::{FieldConfig, FieldKind, FieldValue, FormField};
use super::schema::Schema;
use super::upload::{FileSlot, PendingFile};
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

/// Fatal form-definition error, surfaced when a form is constructed rather
/// than silently at render time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("duplicate field name `{0}` in form definition")]
    DuplicateField(String),
    #[error("custom field `{0}` declared without a render function")]
    MissingCustomRenderer(String),
    #[error("schema rule references undeclared field `{0}`")]
    UnknownRuleField(String),
}

/// Why a submission attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please correct the highlighted fields.")]
    Validation,
    #[error("The server did not return a patient id.")]
    MissingId,
    #[error("Submission failed: {0}")]
    Backend(String),
}

/// Submission lifecycle: Idle -> Submitting -> Succeeded | Failed -> Idle
/// (any edit after a failure returns the form to Idle)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(SubmitError),
}

/// Outcome of asking the form to start a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGate {
    /// A submission is already in flight; re-entry refused
    AlreadySubmitting,
    /// Validation failed; field errors were surfaced, backend must not be called
    Invalid,
    /// Snapshot is valid and the status moved to Submitting
    Ready,
}

/// Owns every field value and error of one form instance, the focus
/// traversal, and the submission status. Field values exist only for names
/// declared in the configuration list.
#[derive(Debug, Clone)]
pub struct FormModel {
    fields: Vec<FormField>,
    schema: Schema,
    errors: BTreeMap<String, String>,
    active: usize,
    status: SubmitStatus,
}

impl FormModel {
    /// Build a form from its field configuration and schema. Duplicate
    /// names, custom fields without a renderer, and rules naming undeclared
    /// fields are configuration errors and fail here.
    pub fn new(configs: Vec<FieldConfig>, schema: Schema) -> Result<Self, ConfigError> {
        for (i, config) in configs.iter().enumerate() {
            if configs[..i].iter().any(|c| c.name == config.name) {
                return Err(ConfigError::DuplicateField(config.name.clone()));
            }
            if config.kind == FieldKind::Custom && config.custom.is_none() {
                return Err(ConfigError::MissingCustomRenderer(config.name.clone()));
            }
        }
        for name in schema.referenced_fields() {
            if !configs.iter().any(|c| c.name == name) {
                return Err(ConfigError::UnknownRuleField(name.to_string()));
            }
        }
        Ok(Self {
            fields: configs.into_iter().map(FormField::new).collect(),
            schema,
            errors: BTreeMap::new(),
            active: 0,
            status: SubmitStatus::default(),
        })
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Text value of a named field (empty string when absent)
    pub fn text(&self, name: &str) -> &str {
        self.field(name).map(FormField::as_text).unwrap_or("")
    }

    /// Selected option id of a named field (empty string when absent)
    pub fn choice(&self, name: &str) -> &str {
        self.field(name).map(FormField::as_choice).unwrap_or("")
    }

    pub fn checked(&self, name: &str) -> bool {
        self.field(name).is_some_and(FormField::as_bool)
    }

    pub fn file(&self, name: &str) -> Option<&FileSlot> {
        match self.field(name).map(|f| &f.value) {
            Some(FieldValue::File(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting)
    }

    // --- focus traversal -------------------------------------------------
    // Index `field_count()` is the virtual submit row.

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// True when focus sits on the submit button row
    pub fn on_submit_row(&self) -> bool {
        self.active == self.fields.len()
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.fields.get(self.active)
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active)
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % (self.fields.len() + 1);
    }

    pub fn prev_field(&mut self) {
        if self.active == 0 {
            self.active = self.fields.len();
        } else {
            self.active -= 1;
        }
    }

    /// True when the active field accepts embedded newlines
    pub fn active_is_multiline(&self) -> bool {
        self.active_field()
            .is_some_and(|f| f.config.kind == FieldKind::Textarea)
    }

    // --- editing ---------------------------------------------------------

    /// Type a character into the active field. Editing after a failed
    /// submission returns the form to Idle.
    pub fn input_char(&mut self, c: char) {
        self.touch();
        if let Some(field) = self.active_field_mut() {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        self.touch();
        if let Some(field) = self.active_field_mut() {
            field.pop_char();
        }
    }

    pub fn toggle_active(&mut self) {
        self.touch();
        if let Some(field) = self.active_field_mut() {
            field.toggle();
        }
    }

    pub fn next_choice(&mut self) {
        self.touch();
        if let Some(field) = self.active_field_mut() {
            field.next_choice();
        }
    }

    pub fn prev_choice(&mut self) {
        self.touch();
        if let Some(field) = self.active_field_mut() {
            field.prev_choice();
        }
    }

    /// Upload slot of the active field, when it is a FileUpload
    pub fn active_file_slot(&self) -> Option<&FileSlot> {
        match self.active_field().map(|f| &f.value) {
            Some(FieldValue::File(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Attach a file to the active upload field, replacing any previous one
    pub fn attach_file(&mut self, file: PendingFile) {
        let attached = match self.active_field_mut().map(|f| &mut f.value) {
            Some(FieldValue::File(slot)) => {
                slot.select(file);
                true
            }
            _ => false,
        };
        if attached {
            self.touch();
        }
    }

    /// Select the typed path of the active upload field. A failed path
    /// lookup changes nothing, so the submission status stays put.
    pub fn select_typed_file(&mut self) -> Option<io::Result<()>> {
        let result = match self.active_field_mut().map(|f| &mut f.value) {
            Some(FieldValue::File(slot)) => Some(slot.select_typed()),
            _ => None,
        };
        if matches!(result, Some(Ok(()))) {
            self.touch();
        }
        result
    }

    /// Overwrite a named text field (used to carry values between wizard
    /// steps in-process; they never travel through the route)
    pub fn set_text(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            field.set_text(value.to_string());
        }
    }

    fn touch(&mut self) {
        if matches!(self.status, SubmitStatus::Failed(_)) {
            self.status = SubmitStatus::Idle;
        }
    }

    // --- submission ------------------------------------------------------

    /// Start a submission: refuse while one is in flight, validate the
    /// current snapshot, and either surface field errors or transition to
    /// Submitting. The backend call itself belongs to the caller and must
    /// happen exactly once per `Ready`.
    pub fn try_begin_submit(&mut self) -> SubmitGate {
        if self.is_submitting() {
            return SubmitGate::AlreadySubmitting;
        }
        let errors = self.schema.validate(&self.fields);
        if !errors.is_empty() {
            self.errors = errors;
            self.status = SubmitStatus::Failed(SubmitError::Validation);
            return SubmitGate::Invalid;
        }
        self.errors.clear();
        self.status = SubmitStatus::Submitting;
        SubmitGate::Ready
    }

    /// Record a successful backend call
    pub fn complete_success(&mut self) {
        self.status = SubmitStatus::Succeeded;
    }

    /// Record a failed backend call; the submit affordance is re-enabled
    pub fn fail(&mut self, error: SubmitError) {
        self.status = SubmitStatus::Failed(error);
    }

    /// Reset all values, errors, focus, and status
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.errors.clear();
        self.active = 0;
        self.status = SubmitStatus::Idle;
    }
}
