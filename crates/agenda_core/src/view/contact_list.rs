//! Sorted contact list projection.
//!
//! # Responsibility
//! - Order contacts by name for display.
//! - Shape display rows (list key, avatar URL) and the intents they emit.
//!
//! # Invariants
//! - Ordering is ascending by name, ignoring accents and case first, then
//!   accents, then case (lowercase first), then raw code points and email.
//!   The order is total.
//! - Input slices are never reordered in place.

use crate::model::contact::Contact;
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use url::Url;

const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";

static AVATAR_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(AVATAR_ENDPOINT).expect("valid avatar endpoint"));

/// Gesture emitted by a list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    Edit(Contact),
    Delete { email: String },
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    /// Stable row key. Equal to the contact email.
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar_url: String,
}

impl ContactRow {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            key: contact.email.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            avatar_url: avatar_url(&contact.name),
        }
    }

    pub fn edit_intent(&self) -> ListIntent {
        ListIntent::Edit(Contact::new(
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
        ))
    }

    pub fn delete_intent(&self) -> ListIntent {
        ListIntent::Delete {
            email: self.email.clone(),
        }
    }
}

/// Compares two names the way the list orders them.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(&base_letters(right))
        .then_with(|| accented_letters(left).cmp(&accented_letters(right)))
        .then_with(|| case_pattern(left).cmp(case_pattern(right)))
        .then_with(|| left.cmp(right))
}

// Decomposed, marks dropped, lowercased: "Ángela" -> "angela".
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented_letters(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

// Lowercase sorts before uppercase.
fn case_pattern(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

/// Returns a name-sorted copy of the given contacts.
pub fn sorted<'a, I>(contacts: I) -> Vec<&'a Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut sorted = contacts.into_iter().collect::<Vec<_>>();
    sorted.sort_by(|left, right| {
        compare_names(&left.name, &right.name).then_with(|| left.email.cmp(&right.email))
    });
    sorted
}

/// Builds display rows in list order.
pub fn render_rows<'a, I>(contacts: I) -> Vec<ContactRow>
where
    I: IntoIterator<Item = &'a Contact>,
{
    sorted(contacts)
        .into_iter()
        .map(ContactRow::from_contact)
        .collect()
}

/// Builds the generated-avatar image URL for a display name.
pub fn avatar_url(name: &str) -> String {
    let mut url = AVATAR_BASE_URL.clone();
    url.query_pairs_mut()
        .append_pair("name", name)
        .append_pair("background", "random")
        .append_pair("rounded", "true");
    url.into()
}
