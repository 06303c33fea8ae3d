//! Name search and alphabet filtering.
//!
//! # Responsibility
//! - Decide whether a contact is visible for the current search term and
//!   letter selection.
//!
//! # Invariants
//! - Matching is case-insensitive and only considers the contact name.
//! - An empty search term and `LetterFilter::All` pass every contact.

use crate::model::contact::Contact;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Letter selection for the alphabet bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LetterFilter {
    #[default]
    All,
    Letter(char),
}

impl LetterFilter {
    /// Returns whether `name` passes this filter.
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Letter(letter) => name
                .to_lowercase()
                .starts_with(&letter.to_lowercase().to_string()),
        }
    }
}

impl Display for LetterFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Letter(letter) => write!(f, "{letter}"),
        }
    }
}

impl FromStr for LetterFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                Ok(Self::Letter(letter.to_ascii_uppercase()))
            }
            _ => Err(format!(
                "unsupported letter filter `{trimmed}`; expected all|A..Z"
            )),
        }
    }
}

/// Returns the alphabet bar letters `A..=Z`.
pub fn alphabet() -> impl Iterator<Item = char> {
    'A'..='Z'
}

/// Combined search term and letter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search_term: String,
    pub letter: LetterFilter,
}

impl ContactFilter {
    pub fn new(search_term: impl Into<String>, letter: LetterFilter) -> Self {
        Self {
            search_term: search_term.into(),
            letter,
        }
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        let matches_search = contact
            .name
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        matches_search && self.letter.matches(&contact.name)
    }

    /// Filters `contacts`, keeping their original order.
    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        contacts.iter().filter(|contact| self.matches(contact)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{alphabet, ContactFilter, LetterFilter};
    use crate::model::contact::Contact;

    fn anna() -> Contact {
        Contact::new("Anna Smith", "anna@example.com", "111")
    }

    fn bob() -> Contact {
        Contact::new("Bob Jones", "bob@example.com", "222")
    }

    #[test]
    fn search_term_matches_substring_ignoring_case() {
        let filter = ContactFilter::new("ann", LetterFilter::All);
        assert!(filter.matches(&anna()));
        assert!(!filter.matches(&bob()));

        let filter = ContactFilter::new("SMI", LetterFilter::All);
        assert!(filter.matches(&anna()));
    }

    #[test]
    fn letter_filter_matches_name_prefix() {
        let filter = ContactFilter::new("", LetterFilter::Letter('B'));
        assert!(filter.matches(&bob()));
        assert!(!filter.matches(&anna()));

        let lower = ContactFilter::new("", LetterFilter::Letter('b'));
        assert!(lower.matches(&bob()));
    }

    #[test]
    fn search_and_letter_must_both_match() {
        let filter = ContactFilter::new("jones", LetterFilter::Letter('A'));
        assert!(!filter.matches(&bob()));
        assert!(!filter.matches(&anna()));
    }

    #[test]
    fn apply_keeps_input_order() {
        let contacts = vec![bob(), anna()];
        let visible = ContactFilter::default().apply(&contacts);
        assert_eq!(visible, vec![&contacts[0], &contacts[1]]);
    }

    #[test]
    fn letter_filter_parses_all_and_single_letters() {
        assert_eq!("all".parse::<LetterFilter>().unwrap(), LetterFilter::All);
        assert_eq!("ALL".parse::<LetterFilter>().unwrap(), LetterFilter::All);
        assert_eq!(
            "b".parse::<LetterFilter>().unwrap(),
            LetterFilter::Letter('B')
        );
        assert!("bb".parse::<LetterFilter>().is_err());
        assert!("1".parse::<LetterFilter>().is_err());
    }

    #[test]
    fn alphabet_has_26_uppercase_letters() {
        let letters: String = alphabet().collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
}
