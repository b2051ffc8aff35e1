//! Form field value objects

use super::upload::FileSlot;
use ratatui::{layout::Rect, Frame};

/// Render function for [`FieldKind::Custom`] fields, supplied by the caller
/// at form-definition time. Receives the live field and focus flag.
pub type CustomRender = fn(&mut Frame, Rect, &FormField, bool);

/// Closed set of input widget kinds a field can render as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Phone,
    Date,
    Select,
    Textarea,
    Checkbox,
    FileUpload,
    Custom,
}

/// One selectable entry for a Select field, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Phone(String),
    /// Raw typed date input; parsed against the field's date format on validate
    Date(String),
    /// Selected option id, if any
    Choice(Option<String>),
    Bool(bool),
    File(FileSlot),
}

impl FieldValue {
    /// Initial value for a field of the given kind
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Textarea => FieldValue::Text(String::new()),
            FieldKind::Phone => FieldValue::Phone(String::new()),
            FieldKind::Date => FieldValue::Date(String::new()),
            FieldKind::Select | FieldKind::Custom => FieldValue::Choice(None),
            FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::FileUpload => FieldValue::File(FileSlot::default()),
        }
    }

    /// True when the field holds no user input yet
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Date(s) => s.is_empty(),
            FieldValue::Choice(c) => c.is_none(),
            FieldValue::Bool(b) => !b,
            FieldValue::File(slot) => slot.selected().is_none(),
        }
    }
}

/// Default date display format when a Date field does not configure one
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Time suffix appended to the date format when `show_time` is set
pub const TIME_SUFFIX: &str = " %H:%M";

/// Immutable configuration of one form field, created at form-definition time
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    /// Single-glyph prefix shown before the value (e.g. "@" for email)
    pub icon: Option<&'static str>,
    pub disabled: bool,
    /// chrono format string for Date fields; `%m/%d/%Y` when unset
    pub date_format: Option<String>,
    pub show_time: bool,
    pub options: Vec<SelectOption>,
    pub custom: Option<CustomRender>,
}

impl FieldConfig {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: None,
            placeholder: None,
            icon: None,
            disabled: false,
            date_format: None,
            show_time: false,
            options: Vec::new(),
            custom: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn date_format(mut self, format: &str) -> Self {
        self.date_format = Some(format.to_string());
        self
    }

    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn custom(mut self, render: CustomRender) -> Self {
        self.custom = Some(render);
        self
    }

    /// Label shown to the user, falling back to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Effective chrono format for a Date field, including the time
    /// component when configured
    pub fn effective_date_format(&self) -> String {
        let base = self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
        if self.show_time {
            format!("{base}{TIME_SUFFIX}")
        } else {
            base.to_string()
        }
    }
}

/// A single form field: configuration plus current value
#[derive(Debug, Clone)]
pub struct FormField {
    pub config: FieldConfig,
    pub value: FieldValue,
}

impl FormField {
    pub fn new(config: FieldConfig) -> Self {
        let value = FieldValue::default_for(config.kind);
        Self { config, value }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the text value (empty string for non-textual fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Date(s) => s,
            _ => "",
        }
    }

    /// Get the selected option id (empty string when none)
    pub fn as_choice(&self) -> &str {
        match &self.value {
            FieldValue::Choice(Some(id)) => id,
            _ => "",
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self.value, FieldValue::Bool(true))
    }

    /// Set the text value, keeping the value variant of the field kind
    pub fn set_text(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Date(s) => *s = value,
            _ => {}
        }
    }

    pub fn set_choice(&mut self, id: Option<String>) {
        if let FieldValue::Choice(c) = &mut self.value {
            *c = id;
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if self.config.disabled {
            return;
        }
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Phone(s) => {
                // E.164-style entry: optional leading '+', digits only after
                if c == '+' && s.is_empty() {
                    s.push(c);
                } else if c.is_ascii_digit() && s.len() < 16 {
                    s.push(c);
                }
            }
            FieldValue::Date(s) => {
                if c.is_ascii_digit() || matches!(c, '/' | '-' | ':' | ' ' | '.') {
                    s.push(c);
                }
            }
            FieldValue::File(slot) => slot.push_char(c),
            FieldValue::Bool(b) => {
                if c == ' ' {
                    *b = !*b;
                }
            }
            FieldValue::Choice(_) => {}
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Date(s) => {
                s.pop();
            }
            FieldValue::File(slot) => slot.pop_char(),
            _ => {}
        }
    }

    /// Toggle a checkbox field
    pub fn toggle(&mut self) {
        if let FieldValue::Bool(b) = &mut self.value {
            *b = !*b;
        }
    }

    /// Cycle to the next select option (wraps; selects the first when none)
    pub fn next_choice(&mut self) {
        let options = &self.config.options;
        if options.is_empty() {
            return;
        }
        if let FieldValue::Choice(current) = &mut self.value {
            let next = match current
                .as_deref()
                .and_then(|id| options.iter().position(|o| o.id == id))
            {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            };
            *current = Some(options[next].id.clone());
        }
    }

    /// Cycle to the previous select option (wraps; selects the last when none)
    pub fn prev_choice(&mut self) {
        let options = &self.config.options;
        if options.is_empty() {
            return;
        }
        if let FieldValue::Choice(current) = &mut self.value {
            let prev = match current
                .as_deref()
                .and_then(|id| options.iter().position(|o| o.id == id))
            {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            };
            *current = Some(options[prev].id.clone());
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value = FieldValue::default_for(self.config.kind);
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Date(s) => s.clone(),
            FieldValue::Choice(Some(id)) => self
                .config
                .options
                .iter()
                .find(|o| &o.id == id)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| id.clone()),
            FieldValue::Choice(None) => String::new(),
            FieldValue::Bool(b) => if *b { "[x]" } else { "[ ]" }.to_string(),
            FieldValue::File(slot) => slot.display_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(name: &str) -> FormField {
        FormField::new(FieldConfig::new(name, FieldKind::Text).label("Label"))
    }

    mod field_value {
        use super::*;

        #[test]
        fn test_default_for_each_kind() {
            assert_eq!(
                FieldValue::default_for(FieldKind::Text),
                FieldValue::Text(String::new())
            );
            assert_eq!(
                FieldValue::default_for(FieldKind::Phone),
                FieldValue::Phone(String::new())
            );
            assert_eq!(
                FieldValue::default_for(FieldKind::Checkbox),
                FieldValue::Bool(false)
            );
            assert_eq!(
                FieldValue::default_for(FieldKind::Select),
                FieldValue::Choice(None)
            );
        }

        #[test]
        fn test_defaults_are_empty() {
            for kind in [
                FieldKind::Text,
                FieldKind::Phone,
                FieldKind::Date,
                FieldKind::Select,
                FieldKind::Textarea,
                FieldKind::Checkbox,
                FieldKind::FileUpload,
                FieldKind::Custom,
            ] {
                assert!(FieldValue::default_for(kind).is_empty(), "{kind:?}");
            }
        }

        #[test]
        fn test_checked_checkbox_is_not_empty() {
            assert!(!FieldValue::Bool(true).is_empty());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_push_and_pop_char() {
            let mut field = text_field("name");
            field.push_char('h');
            field.push_char('i');
            assert_eq!(field.as_text(), "hi");
            field.pop_char();
            assert_eq!(field.as_text(), "h");
        }

        #[test]
        fn test_disabled_field_rejects_input() {
            let mut field =
                FormField::new(FieldConfig::new("name", FieldKind::Text).disabled(true));
            field.push_char('x');
            assert_eq!(field.as_text(), "");
        }

        #[test]
        fn test_phone_accepts_leading_plus_only() {
            let mut field = FormField::new(FieldConfig::new("phone", FieldKind::Phone));
            field.push_char('+');
            field.push_char('4');
            field.push_char('+');
            field.push_char('9');
            assert_eq!(field.as_text(), "+49");
        }

        #[test]
        fn test_phone_rejects_letters() {
            let mut field = FormField::new(FieldConfig::new("phone", FieldKind::Phone));
            field.push_char('a');
            field.push_char('1');
            assert_eq!(field.as_text(), "1");
        }

        #[test]
        fn test_checkbox_toggle() {
            let mut field = FormField::new(FieldConfig::new("consent", FieldKind::Checkbox));
            assert!(!field.as_bool());
            field.toggle();
            assert!(field.as_bool());
            field.toggle();
            assert!(!field.as_bool());
        }

        #[test]
        fn test_checkbox_space_toggles() {
            let mut field = FormField::new(FieldConfig::new("consent", FieldKind::Checkbox));
            field.push_char(' ');
            assert!(field.as_bool());
        }

        #[test]
        fn test_clear_resets_to_kind_default() {
            let mut field = text_field("name");
            field.push_char('x');
            field.clear();
            assert_eq!(field.value, FieldValue::Text(String::new()));
        }
    }

    mod choices {
        use super::*;

        fn select_field() -> FormField {
            FormField::new(FieldConfig::new("physician", FieldKind::Select).options(vec![
                SelectOption::new("a", "Dr. A"),
                SelectOption::new("b", "Dr. B"),
                SelectOption::new("c", "Dr. C"),
            ]))
        }

        #[test]
        fn test_next_choice_selects_first_when_none() {
            let mut field = select_field();
            field.next_choice();
            assert_eq!(field.as_choice(), "a");
        }

        #[test]
        fn test_next_choice_wraps() {
            let mut field = select_field();
            field.set_choice(Some("c".to_string()));
            field.next_choice();
            assert_eq!(field.as_choice(), "a");
        }

        #[test]
        fn test_prev_choice_wraps_to_last() {
            let mut field = select_field();
            field.set_choice(Some("a".to_string()));
            field.prev_choice();
            assert_eq!(field.as_choice(), "c");
        }

        #[test]
        fn test_display_value_uses_option_label() {
            let mut field = select_field();
            field.set_choice(Some("b".to_string()));
            assert_eq!(field.display_value(), "Dr. B");
        }

        #[test]
        fn test_choice_cycle_on_empty_options_is_noop() {
            let mut field = FormField::new(FieldConfig::new("x", FieldKind::Select));
            field.next_choice();
            assert_eq!(field.as_choice(), "");
        }
    }

    mod kind_compatibility {
        use super::*;

        #[test]
        fn test_text_value_survives_textarea_kind_switch() {
            // Text and Textarea share the same value representation, so a
            // field redefined between renders keeps its last value.
            let mut field = text_field("notes");
            field.set_text("some notes".to_string());
            field.config.kind = FieldKind::Textarea;
            assert_eq!(field.display_value(), "some notes");
            field.config.kind = FieldKind::Text;
            assert_eq!(field.display_value(), "some notes");
        }
    }

    mod date_format {
        use super::*;

        #[test]
        fn test_default_date_format() {
            let config = FieldConfig::new("birth_date", FieldKind::Date);
            assert_eq!(config.effective_date_format(), "%m/%d/%Y");
        }

        #[test]
        fn test_show_time_appends_time_component() {
            let config = FieldConfig::new("appointment", FieldKind::Date)
                .date_format("%Y-%m-%d")
                .show_time(true);
            assert_eq!(config.effective_date_format(), "%Y-%m-%d %H:%M");
        }
    }
}
