//! Form engine: typed fields, validation schema, and submission state

mod definitions;
mod field;
mod form_state;
mod schema;
mod upload;

pub use definitions::{patient_form, register_form};
pub use field::{
    CustomRender, FieldConfig, FieldKind, FieldValue, FormField, SelectOption,
    DEFAULT_DATE_FORMAT,
};
pub use form_state::{ConfigError, FormModel, SubmitError, SubmitGate, SubmitStatus};
pub use schema::{Rule, Schema};
pub use upload::{FileBrowser, FileSlot, PendingFile};
