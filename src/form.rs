//! Contact form fields and their validation rules.
//!
//! Every field is trimmed before it is checked. Rules run in order and the
//! first failing rule decides the message: the empty check first, then the
//! field-specific rule.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// The four fixed fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// The `name` attribute the field carries in the page
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Capitalized name used in "is required" messages
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Minimum trimmed length, for fields with a length rule
    pub fn min_len(self) -> Option<usize> {
        match self {
            Field::Name => Some(2),
            Field::Email => None,
            Field::Subject => Some(5),
            Field::Message => Some(10),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual validity state of a field's group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Untouched, or cleared by an input event
    #[default]
    Idle,
    Valid,
    InvalidEmpty,
    InvalidRule,
}

impl FieldStatus {
    pub fn is_error(self) -> bool {
        matches!(self, FieldStatus::InvalidEmpty | FieldStatus::InvalidRule)
    }
}

/// Why a field value was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required(Field),
    TooShort { field: Field, min: usize },
    InvalidEmail,
}

impl ValidationError {
    pub fn status(&self) -> FieldStatus {
        match self {
            ValidationError::Required(_) => FieldStatus::InvalidEmpty,
            _ => FieldStatus::InvalidRule,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{} is required.", field.label()),
            ValidationError::TooShort { field, min } => write!(
                f,
                "{} must be at least {} characters long.",
                field.label(),
                min
            ),
            ValidationError::InvalidEmail => f.write_str("Please enter a valid email address."),
        }
    }
}

/// Simple `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check one raw value against the rules of `field`.
pub fn check(field: Field, raw: &str) -> std::result::Result<(), ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if field == Field::Email && !is_valid_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    // lengths are UTF-16 code units, as the page measures them
    if let Some(min) = field.min_len() {
        if value.encode_utf16().count() < min {
            return Err(ValidationError::TooShort { field, min });
        }
    }
    Ok(())
}

/// A `.form-group`: the field's value plus its visible validity state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldGroup {
    pub value: String,
    pub status: FieldStatus,
    /// Text of the group's `.error-message` element
    pub message: String,
    has_error_slot: bool,
}

/// Trimmed field values handed to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// The contact form's field state
#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    groups: [FieldGroup; 4],
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// A form whose groups all carry an `.error-message` element
    pub fn new() -> Self {
        Self::with_error_slots([true; 4])
    }

    /// A form where only groups flagged in `slots` (form order) can show a
    /// message. Validity state is tracked either way.
    pub fn with_error_slots(slots: [bool; 4]) -> Self {
        let groups = slots.map(|has_error_slot| FieldGroup {
            has_error_slot,
            ..FieldGroup::default()
        });
        Self { groups }
    }

    pub fn group(&self, field: Field) -> &FieldGroup {
        &self.groups[field.index()]
    }

    pub fn value(&self, field: Field) -> &str {
        &self.groups[field.index()].value
    }

    pub fn status(&self, field: Field) -> FieldStatus {
        self.groups[field.index()].status
    }

    /// Input event: store the value and optimistically clear the group.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.groups[field.index()].value = value.into();
        self.clear_error(field);
    }

    pub fn clear_error(&mut self, field: Field) {
        let group = &mut self.groups[field.index()];
        group.status = FieldStatus::Idle;
        group.message.clear();
    }

    /// Validate one field and mark its group. Returns whether it passed.
    pub fn validate_field(&mut self, field: Field) -> bool {
        self.clear_error(field);
        let group = &mut self.groups[field.index()];
        match check(field, &group.value) {
            Ok(()) => {
                group.status = FieldStatus::Valid;
                true
            }
            Err(err) => {
                log::debug!("field {} rejected: {}", field, err);
                group.status = err.status();
                if group.has_error_slot {
                    group.message = err.to_string();
                }
                false
            }
        }
    }

    /// Validate every field (no short-circuit) and report whether all passed.
    pub fn validate_form(&mut self) -> bool {
        Field::ALL
            .into_iter()
            .fold(true, |ok, field| self.validate_field(field) && ok)
    }

    /// Empty every value and remove all error/success marks.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            group.value.clear();
            group.status = FieldStatus::Idle;
            group.message.clear();
        }
    }

    pub fn message(&self) -> ContactMessage {
        ContactMessage {
            name: self.value(Field::Name).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            subject: self.value(Field::Subject).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_value(Field::Name, "Ada");
        form.set_value(Field::Email, "ada@example.com");
        form.set_value(Field::Subject, "Hello there");
        form.set_value(Field::Message, "I would like to talk.");
        form
    }

    #[test]
    fn short_values_fail_with_message() {
        for field in [Field::Name, Field::Subject, Field::Message] {
            let min = field.min_len().unwrap();
            for len in 1..min {
                let mut form = ContactForm::new();
                form.set_value(field, "x".repeat(len));
                assert!(!form.validate_field(field), "{} with {} chars", field, len);
                assert_eq!(form.status(field), FieldStatus::InvalidRule);
                assert!(!form.group(field).message.is_empty());
            }
        }
    }

    #[test]
    fn empty_and_blank_values_are_required() {
        let mut form = ContactForm::new();
        form.set_value(Field::Subject, "   ");
        assert!(!form.validate_field(Field::Subject));
        assert_eq!(form.status(Field::Subject), FieldStatus::InvalidEmpty);
        assert_eq!(form.group(Field::Subject).message, "Subject is required.");
    }

    #[test]
    fn values_are_trimmed_before_length_check() {
        assert!(check(Field::Name, " A ").is_err());
        assert!(check(Field::Name, " Al ").is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check(Field::Name, "é").is_err());
        assert!(check(Field::Name, "éé").is_ok());
    }

    #[test]
    fn length_counts_utf16_units() {
        // each emoji is a surrogate pair
        assert!(check(Field::Name, "😀").is_ok());
        assert_eq!(
            check(Field::Subject, "😀😀"),
            Err(ValidationError::TooShort {
                field: Field::Subject,
                min: 5
            })
        );
        assert!(check(Field::Subject, "😀😀😀").is_ok());
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.co", "first.last@sub.domain.org", "x+tag@host.io"] {
            assert!(is_valid_email(ok), "{}", ok);
        }
        for bad in ["plain", "no-at.example.com", "user@nodot", "two@@x.com", "sp ace@x.com", "@x.com", "a@.", "a@b."] {
            assert!(!is_valid_email(bad), "{}", bad);
        }
    }

    #[test]
    fn email_rule_message() {
        let err = check(Field::Email, "nope").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn too_short_messages_match_page_copy() {
        assert_eq!(
            check(Field::Message, "short").unwrap_err().to_string(),
            "Message must be at least 10 characters long."
        );
        assert_eq!(
            check(Field::Name, "A").unwrap_err().to_string(),
            "Name must be at least 2 characters long."
        );
    }

    #[test]
    fn validate_form_checks_every_field() {
        let mut form = ContactForm::new();
        form.set_value(Field::Name, "Ada");
        assert!(!form.validate_form());
        assert_eq!(form.status(Field::Name), FieldStatus::Valid);
        for field in [Field::Email, Field::Subject, Field::Message] {
            assert_eq!(form.status(field), FieldStatus::InvalidEmpty);
        }

        let mut form = filled();
        assert!(form.validate_form());
        assert!(Field::ALL.iter().all(|f| form.status(*f) == FieldStatus::Valid));
    }

    #[test]
    fn validate_form_agrees_with_individual_fields() {
        let cases = [
            ["Ada", "ada@example.com", "Hello", "0123456789"],
            ["A", "ada@example.com", "Hello", "0123456789"],
            ["Ada", "ada-example.com", "Hello", "0123456789"],
            ["Ada", "ada@example.com", "Hey", "0123456789"],
            ["Ada", "ada@example.com", "Hello", "012345678"],
        ];
        for values in cases {
            let mut form = ContactForm::new();
            for (field, value) in Field::ALL.into_iter().zip(values) {
                form.set_value(field, value);
            }
            let individually = Field::ALL
                .into_iter()
                .all(|f| check(f, form.value(f)).is_ok());
            assert_eq!(form.validate_form(), individually, "{:?}", values);
        }
    }

    #[test]
    fn input_clears_previous_error() {
        let mut form = ContactForm::new();
        assert!(!form.validate_field(Field::Email));
        form.set_value(Field::Email, "x");
        assert_eq!(form.status(Field::Email), FieldStatus::Idle);
        assert!(form.group(Field::Email).message.is_empty());
    }

    #[test]
    fn missing_error_slot_keeps_message_empty() {
        let mut form = ContactForm::with_error_slots([false, true, true, true]);
        assert!(!form.validate_field(Field::Name));
        assert_eq!(form.status(Field::Name), FieldStatus::InvalidEmpty);
        assert!(form.group(Field::Name).message.is_empty());
    }

    #[test]
    fn reset_empties_everything() {
        let mut form = filled();
        form.validate_form();
        form.reset();
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
            assert_eq!(form.status(field), FieldStatus::Idle);
        }
    }

    #[test]
    fn message_is_trimmed() {
        let mut form = filled();
        form.set_value(Field::Name, "  Ada  ");
        assert_eq!(form.message().name, "Ada");
    }
}
