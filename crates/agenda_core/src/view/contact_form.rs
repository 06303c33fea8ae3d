//! Contact create/edit form state.
//!
//! # Responsibility
//! - Hold field values for the create/edit modal.
//! - Enforce digits-only phone input at every change.
//! - Validate required fields before emitting a record.
//!
//! # Invariants
//! - `phone` only ever contains ASCII digits.
//! - A successful submit clears all fields; a rejected submit keeps them.

use crate::model::contact::{Contact, ContactValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// `\d` would also accept non-ASCII digits.
static PHONE_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("valid phone input regex"));

/// Returns whether `value` is acceptable phone field content.
pub fn is_phone_input(value: &str) -> bool {
    PHONE_INPUT_RE.is_match(value)
}

/// Whether the form creates a new contact or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Form rejection surfaced to the user before anything is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    Incomplete(ContactValidationError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete(_) => f.write_str("All fields are required"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Incomplete(err) => Some(err),
        }
    }
}

/// Intent emitted by the form toward the contact book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Submit(Contact),
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    mode: FormMode,
}

impl ContactForm {
    /// Empty form in create mode.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            mode: FormMode::Create,
        }
    }

    /// Form pre-populated from the edit target, or empty when there is none.
    pub fn for_editing(editing: Option<&Contact>) -> Self {
        match editing {
            Some(contact) => Self {
                name: contact.name.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                mode: FormMode::Edit,
            },
            None => Self::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    /// Replaces the phone value when `value` is digits only.
    ///
    /// Returns `false` and keeps the previous value otherwise.
    pub fn set_phone(&mut self, value: &str) -> bool {
        if !is_phone_input(value) {
            return false;
        }
        self.phone = value.to_string();
        true
    }

    /// Applies one keystroke to the phone field.
    pub fn type_phone_char(&mut self, key: char) -> bool {
        let mut next = self.phone.clone();
        next.push(key);
        self.set_phone(&next)
    }

    /// Applies a sequence of keystrokes, discarding rejected ones.
    pub fn type_phone(&mut self, keys: &str) {
        for key in keys.chars() {
            self.type_phone_char(key);
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New contact",
            FormMode::Edit => "Edit contact",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add",
            FormMode::Edit => "Update",
        }
    }

    /// Validates the fields and emits the record, clearing the form.
    pub fn submit(&mut self) -> Result<FormIntent, FormError> {
        let contact = Contact::new(self.name.clone(), self.email.clone(), self.phone.clone());
        contact.validate().map_err(FormError::Incomplete)?;

        self.name.clear();
        self.email.clear();
        self.phone.clear();
        Ok(FormIntent::Submit(contact))
    }

    pub fn close(&self) -> FormIntent {
        FormIntent::Close
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_phone_input, ContactForm, FormError, FormIntent, FormMode};
    use crate::model::contact::{Contact, ContactField, ContactValidationError};

    #[test]
    fn typing_non_digits_is_discarded() {
        let mut form = ContactForm::new();
        form.type_phone("12a3");
        assert_eq!(form.phone(), "123");
    }

    #[test]
    fn pasting_mixed_value_keeps_previous_phone() {
        let mut form = ContactForm::new();
        assert!(form.set_phone("555"));
        assert!(!form.set_phone("555-1234"));
        assert_eq!(form.phone(), "555");
        assert!(form.set_phone(""));
        assert_eq!(form.phone(), "");
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        assert!(is_phone_input("0123456789"));
        assert!(!is_phone_input("١٢٣"));
    }

    #[test]
    fn submit_rejects_missing_fields_and_keeps_state() {
        let mut form = ContactForm::new();
        form.set_name("Anna");
        form.set_phone("123");

        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::Incomplete(ContactValidationError::MissingField(ContactField::Email))
        );
        assert_eq!(err.to_string(), "All fields are required");
        assert_eq!(form.name(), "Anna");
        assert_eq!(form.phone(), "123");
    }

    #[test]
    fn submit_emits_record_and_clears_fields() {
        let mut form = ContactForm::new();
        form.set_name("Anna");
        form.set_email("anna@example.com");
        form.type_phone("555");

        let intent = form.submit().unwrap();
        assert_eq!(
            intent,
            FormIntent::Submit(Contact::new("Anna", "anna@example.com", "555"))
        );
        assert_eq!(form.name(), "");
        assert_eq!(form.email(), "");
        assert_eq!(form.phone(), "");
    }

    #[test]
    fn editing_form_is_prepopulated_with_edit_labels() {
        let target = Contact::new("Bob", "bob@example.com", "42");
        let form = ContactForm::for_editing(Some(&target));

        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.name(), "Bob");
        assert_eq!(form.email(), "bob@example.com");
        assert_eq!(form.phone(), "42");
        assert_eq!(form.title(), "Edit contact");
        assert_eq!(form.submit_label(), "Update");

        let create = ContactForm::for_editing(None);
        assert_eq!(create.title(), "New contact");
        assert_eq!(create.submit_label(), "Add");
        assert_eq!(create.close(), FormIntent::Close);
    }
}
