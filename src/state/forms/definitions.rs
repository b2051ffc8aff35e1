//! The intake wizard's form definitions, expressed as configuration
//!
//! Field lists and schemas are data; adding a field or a required-field
//! policy is a change here, not in the engine.

use super::field::{CustomRender, FieldConfig, FieldKind};
use super::form_state::{ConfigError, FormModel};
use super::schema::{Rule, Schema};
use crate::state::options;

/// The first wizard step: the minimal user record
pub fn patient_form() -> Result<FormModel, ConfigError> {
    let fields = vec![
        FieldConfig::new("name", FieldKind::Text)
            .label("Full Name")
            .placeholder("Enter your full name")
            .icon("*"),
        FieldConfig::new("email", FieldKind::Text)
            .label("Email")
            .placeholder("Enter your email")
            .icon("@"),
        FieldConfig::new("phone", FieldKind::Phone)
            .label("Phone Number")
            .placeholder("+14155552671"),
    ];
    let schema = Schema::new()
        .rule("name", Rule::Length { min: 2, max: 30 })
        .rule("email", Rule::Email)
        .rule("phone", Rule::Phone);
    FormModel::new(fields, schema)
}

/// The full intake form shown after the user record exists. The gender
/// radio group has a bespoke layout and is supplied by the caller as a
/// Custom render function.
pub fn register_form(gender_renderer: CustomRender) -> Result<FormModel, ConfigError> {
    let mut fields = vec![
        FieldConfig::new("name", FieldKind::Text)
            .label("Full Name")
            .placeholder("Enter your full name")
            .icon("*"),
        FieldConfig::new("email", FieldKind::Text)
            .label("Email")
            .placeholder("Enter your email")
            .icon("@"),
        FieldConfig::new("phone", FieldKind::Phone)
            .label("Phone Number")
            .placeholder("+14155552671"),
        FieldConfig::new("birth_date", FieldKind::Date)
            .label("Date of Birth")
            .placeholder("MM/DD/YYYY"),
        FieldConfig::new("gender", FieldKind::Custom)
            .label("Gender")
            .options(options::gender_options())
            .custom(gender_renderer),
        FieldConfig::new("address", FieldKind::Text)
            .label("Address")
            .placeholder("Street, city"),
        FieldConfig::new("occupation", FieldKind::Text)
            .label("Occupation")
            .placeholder("Occupation"),
        FieldConfig::new("emergency_contact_name", FieldKind::Text)
            .label("Emergency Contact Name")
            .placeholder("Guardian's name"),
        FieldConfig::new("emergency_contact_phone", FieldKind::Phone)
            .label("Emergency Contact Number")
            .placeholder("+14155552671"),
        FieldConfig::new("primary_physician", FieldKind::Select)
            .label("Primary Physician")
            .placeholder("Select a physician")
            .options(options::doctor_options()),
        FieldConfig::new("insurance_provider", FieldKind::Text)
            .label("Insurance Provider")
            .placeholder("Insurance company"),
        FieldConfig::new("insurance_policy_number", FieldKind::Text)
            .label("Insurance Policy Number")
            .placeholder("Policy number"),
        FieldConfig::new("allergies", FieldKind::Textarea)
            .label("Allergies (if any)")
            .placeholder("Peanuts, penicillin, pollen"),
        FieldConfig::new("current_medication", FieldKind::Textarea)
            .label("Current Medication (if any)")
            .placeholder("Ibuprofen 200mg, Paracetamol 500mg"),
        FieldConfig::new("family_medical_history", FieldKind::Textarea)
            .label("Family Medical History")
            .placeholder("Mother had diabetes"),
        FieldConfig::new("past_medical_history", FieldKind::Textarea)
            .label("Past Medical History")
            .placeholder("Appendectomy, tonsillectomy"),
        FieldConfig::new("identification_type", FieldKind::Select)
            .label("Identification Type")
            .placeholder("Select a document type")
            .options(options::identification_type_options()),
        FieldConfig::new("identification_number", FieldKind::Text)
            .label("Identification Number")
            .placeholder("Document number"),
        FieldConfig::new("identification_document", FieldKind::FileUpload)
            .label("Scanned Copy of Identification Document"),
    ];
    for (name, text) in options::CONSENTS {
        fields.push(FieldConfig::new(name, FieldKind::Checkbox).label(text));
    }

    let mut schema = Schema::new()
        .rule("name", Rule::Length { min: 2, max: 30 })
        .rule("email", Rule::Email)
        .rule("phone", Rule::Phone)
        .rule("birth_date", Rule::Required)
        .rule("birth_date", Rule::Date)
        .rule("gender", Rule::Required)
        .rule("emergency_contact_phone", Rule::Phone)
        .rule("primary_physician", Rule::Required)
        .rule(
            "identification_number",
            Rule::RequiredIf {
                other: "identification_type".to_string(),
            },
        )
        .rule(
            "identification_document",
            Rule::RequiredIf {
                other: "identification_type".to_string(),
            },
        );
    for (name, _) in options::CONSENTS {
        schema = schema.rule(name, Rule::Accepted);
    }

    FormModel::new(fields, schema)
}
