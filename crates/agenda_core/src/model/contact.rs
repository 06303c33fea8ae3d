//! Contact domain model.
//!
//! # Responsibility
//! - Define the single managed record and its wire shape.
//! - Provide required-field validation shared by forms and the contact book.
//!
//! # Invariants
//! - `email` is the correlation key for update/delete.
//! - A valid contact has no empty field. Whitespace counts as content.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Names of the contact fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for contact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// A required field is empty. Carries the first empty field in form order.
    MissingField(ContactField),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "all fields are required: `{field}` is empty")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// A single address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks that every field is non-empty.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map_or(Ok(()), |(field, _)| {
            Err(ContactValidationError::MissingField(field))
        })
    }

    /// Returns whether `other` would collide with this entry on email or name.
    pub fn collides_with(&self, other: &Contact) -> bool {
        self.email == other.email || self.name == other.name
    }
}
