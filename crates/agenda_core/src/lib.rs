//! Core domain logic for the Agenda contact manager.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;
pub mod view;

pub use config::AgendaConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactField, ContactValidationError};
pub use repo::contact_repo::{
    ContactRepository, KvContactRepository, RepoError, RepoResult, CONTACTS_SLOT_KEY,
};
pub use search::filter::{alphabet, ContactFilter, LetterFilter};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::contact_book::{
    BookError, BookResult, ContactBook, FormOutcome, SubmitOutcome, DUPLICATE_CONTACT_MESSAGE,
};
pub use service::notice::{Notice, NoticeToken, WARNING_TTL};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use view::contact_form::{ContactForm, FormError, FormIntent, FormMode};
pub use view::contact_list::{avatar_url, ContactRow, ListIntent};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
