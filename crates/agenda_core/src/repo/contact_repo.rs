//! Contact collection repository over a key-value slot.
//!
//! # Responsibility
//! - Load and persist the whole contact collection as one JSON array.
//! - Keep serialization details out of the state container.
//!
//! # Invariants
//! - An absent slot loads as an empty collection.
//! - A slot that does not decode as a contact array is reported, never
//!   silently replaced.
//! - Writes replace the slot wholesale.

use crate::model::contact::Contact;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot that holds the serialized contact collection.
pub const CONTACTS_SLOT_KEY: &str = "contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Serialize(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize contacts: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Whole-collection persistence contract.
pub trait ContactRepository {
    /// Loads the stored collection in stored order.
    fn load_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Replaces the stored collection.
    fn save_contacts(&mut self, contacts: &[Contact]) -> RepoResult<()>;
}

/// Repository that keeps the collection in [`CONTACTS_SLOT_KEY`].
pub struct KvContactRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvContactRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ContactRepository for KvContactRepository<S> {
    fn load_contacts(&self) -> RepoResult<Vec<Contact>> {
        let Some(raw) = self.store.get(CONTACTS_SLOT_KEY)? else {
            debug!("event=contacts_load module=repo status=ok source=empty count=0");
            return Ok(Vec::new());
        };

        let contacts = serde_json::from_str::<Vec<Contact>>(&raw).map_err(|err| {
            error!(
                "event=contacts_load module=repo status=error error_code=invalid_json line={} column={}",
                err.line(),
                err.column()
            );
            RepoError::InvalidData(format!("slot `{CONTACTS_SLOT_KEY}` is not a contact list: {err}"))
        })?;

        debug!(
            "event=contacts_load module=repo status=ok source=slot count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    fn save_contacts(&mut self, contacts: &[Contact]) -> RepoResult<()> {
        let raw = serde_json::to_string(contacts).map_err(RepoError::Serialize)?;
        self.store.set(CONTACTS_SLOT_KEY, &raw)?;
        debug!(
            "event=contacts_save module=repo status=ok count={}",
            contacts.len()
        );
        Ok(())
    }
}
