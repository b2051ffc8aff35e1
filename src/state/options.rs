//! Static option data referenced by Select and Custom fields
//!
//! Externally supplied constant lists; the form engine renders them but
//! does not own them.

use super::forms::SelectOption;

/// Physicians offered in the primary-physician select
pub const DOCTORS: &[(&str, &str)] = &[
    ("green", "Dr. John Green"),
    ("cameron", "Dr. Leila Cameron"),
    ("livingston", "Dr. David Livingston"),
    ("peter", "Dr. Evan Peter"),
    ("powell", "Dr. Jane Powell"),
    ("ramirez", "Dr. Alex Ramirez"),
    ("lee", "Dr. Jasmine Lee"),
];

/// Accepted identification document types
pub const IDENTIFICATION_TYPES: &[(&str, &str)] = &[
    ("birth_certificate", "Birth Certificate"),
    ("drivers_license", "Driver's License"),
    ("insurance_card", "Medical Insurance Card"),
    ("national_id", "National Identity Card"),
    ("passport", "Passport"),
    ("voter_id", "Voter ID Card"),
];

pub const GENDER_OPTIONS: &[(&str, &str)] =
    &[("male", "Male"), ("female", "Female"), ("other", "Other")];

/// Consent checkbox field names and their texts, all required to register
pub const CONSENTS: &[(&str, &str)] = &[
    (
        "treatment_consent",
        "I consent to receive treatment for my health condition.",
    ),
    (
        "disclosure_consent",
        "I consent to the use and disclosure of my health information for treatment purposes.",
    ),
    (
        "privacy_consent",
        "I acknowledge that I have reviewed and agree to the privacy policy.",
    ),
];

fn to_options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(id, label)| SelectOption::new(id, label))
        .collect()
}

pub fn doctor_options() -> Vec<SelectOption> {
    to_options(DOCTORS)
}

pub fn identification_type_options() -> Vec<SelectOption> {
    to_options(IDENTIFICATION_TYPES)
}

pub fn gender_options() -> Vec<SelectOption> {
    to_options(GENDER_OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ids_are_unique() {
        for pairs in [DOCTORS, IDENTIFICATION_TYPES, GENDER_OPTIONS, CONSENTS] {
            for (i, (id, _)) in pairs.iter().enumerate() {
                assert!(
                    !pairs[..i].iter().any(|(other, _)| other == id),
                    "duplicate id {id}"
                );
            }
        }
    }

    #[test]
    fn test_every_consent_has_text() {
        assert_eq!(CONSENTS.len(), 3);
        for (name, text) in CONSENTS {
            assert!(name.ends_with("_consent"));
            assert!(!text.is_empty());
        }
    }
}
