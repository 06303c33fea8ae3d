//! Contact book state container.
//!
//! # Responsibility
//! - Own the authoritative contact collection, the edit target, filters, the
//!   warning banner and the modal flag.
//! - Apply add/update/delete intents and persist after every mutation.
//!
//! # Invariants
//! - No two stored contacts share an email or a name. Checked by a scan
//!   before every write; the entry being edited is excluded by its original
//!   email.
//! - Persistence happens before the in-memory commit, so a failed write
//!   leaves the book unchanged.
//! - The edit target is cleared and the modal closed after a successful
//!   submit, a close, `start_creating`, or a submit whose target is gone.

use crate::model::contact::{Contact, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use crate::search::filter::{ContactFilter, LetterFilter};
use crate::service::clock::{Clock, SystemClock};
use crate::service::notice::{Notice, NoticeSlot, NoticeToken};
use crate::view::contact_form::{ContactForm, FormIntent};
use crate::view::contact_list::{render_rows, ContactRow, ListIntent};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Warning shown when a submission collides with an existing entry.
pub const DUPLICATE_CONTACT_MESSAGE: &str = "Contact already exists";

pub type BookResult<T> = Result<T, BookError>;

/// Rejection of a contact book intent. The book is unchanged after any error.
#[derive(Debug)]
pub enum BookError {
    Validation(ContactValidationError),
    /// Email or name already used by another entry. `notice` identifies the
    /// warning raised for it.
    Duplicate { notice: NoticeToken },
    /// The edit target's original email no longer matches any entry.
    EditTargetMissing { email: String },
    Repo(RepoError),
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate { .. } => f.write_str(DUPLICATE_CONTACT_MESSAGE),
            Self::EditTargetMissing { email } => {
                write!(f, "contact being edited no longer exists: {email}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Duplicate { .. } | Self::EditTargetMissing { .. } => None,
        }
    }
}

impl From<ContactValidationError> for BookError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Effect of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added,
    Updated { previous_email: String },
}

/// Result of applying a form intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Submitted(SubmitOutcome),
    Closed,
}

/// Explicitly owned contact manager state.
pub struct ContactBook<R: ContactRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    contacts: Vec<Contact>,
    editing: Option<Contact>,
    filter: ContactFilter,
    warning: NoticeSlot,
    modal_open: bool,
}

impl<R: ContactRepository> ContactBook<R, SystemClock> {
    /// Loads the stored collection using the system clock.
    pub fn load(repo: R) -> BookResult<Self> {
        Self::load_with_clock(repo, SystemClock)
    }
}

impl<R: ContactRepository, C: Clock> ContactBook<R, C> {
    /// Initialization routine: reads the stored collection once.
    ///
    /// # Errors
    /// - `BookError::Repo` when the store cannot be read or holds data that
    ///   does not decode as a contact list.
    pub fn load_with_clock(repo: R, clock: C) -> BookResult<Self> {
        let contacts = repo.load_contacts().inspect_err(|err| {
            warn!("event=book_load module=service status=error error={err}");
        })?;
        info!(
            "event=book_load module=service status=ok count={}",
            contacts.len()
        );

        Ok(Self {
            repo,
            clock,
            contacts,
            editing: None,
            filter: ContactFilter::default(),
            warning: NoticeSlot::default(),
            modal_open: false,
        })
    }

    /// All contacts in stored (insertion) order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.email == email)
    }

    pub fn editing(&self) -> Option<&Contact> {
        self.editing.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_letter_filter(&mut self, letter: LetterFilter) {
        self.filter.letter = letter;
    }

    /// Opens the modal for a new contact.
    pub fn start_creating(&mut self) {
        self.editing = None;
        self.modal_open = true;
    }

    /// Sets the edit target and opens the modal.
    pub fn start_editing(&mut self, contact: Contact) {
        self.editing = Some(contact);
        self.modal_open = true;
    }

    /// Closes the modal and drops any edit target.
    pub fn close_modal(&mut self) {
        self.editing = None;
        self.modal_open = false;
    }

    /// Form for the current modal state.
    pub fn open_form(&self) -> ContactForm {
        ContactForm::for_editing(self.editing.as_ref())
    }

    /// Adds `candidate`, or replaces the edit target with it.
    ///
    /// # Errors
    /// - `Validation` when a field is empty.
    /// - `Duplicate` when another entry has the same email or name; a warning
    ///   is raised and the edit target/modal stay as they were.
    /// - `EditTargetMissing` when the edit target was removed meanwhile; the
    ///   stale target is dropped and the modal closed.
    /// - `Repo` when persisting fails.
    pub fn submit_contact(&mut self, candidate: Contact) -> BookResult<SubmitOutcome> {
        candidate.validate()?;

        let excluded_email = self
            .editing
            .as_ref()
            .map_or("", |target| target.email.as_str());
        let exists = self
            .contacts
            .iter()
            .any(|contact| contact.collides_with(&candidate) && contact.email != excluded_email);
        if exists {
            let notice = self.warning.show(DUPLICATE_CONTACT_MESSAGE, self.clock.now());
            info!("event=contact_submit module=service status=rejected reason=duplicate notice={notice}");
            return Err(BookError::Duplicate { notice });
        }

        let missing_target = self
            .editing
            .as_ref()
            .filter(|target| self.find_by_email(&target.email).is_none())
            .map(|target| target.email.clone());
        if let Some(email) = missing_target {
            self.close_modal();
            warn!("event=contact_submit module=service status=rejected reason=edit_target_missing");
            return Err(BookError::EditTargetMissing { email });
        }

        let (next, outcome) = match &self.editing {
            Some(target) => {
                let next = self
                    .contacts
                    .iter()
                    .map(|contact| {
                        if contact.email == target.email {
                            candidate.clone()
                        } else {
                            contact.clone()
                        }
                    })
                    .collect::<Vec<_>>();
                let outcome = SubmitOutcome::Updated {
                    previous_email: target.email.clone(),
                };
                (next, outcome)
            }
            None => {
                let mut next = self.contacts.clone();
                next.push(candidate);
                (next, SubmitOutcome::Added)
            }
        };

        self.commit(next)?;
        self.close_modal();

        let action = match outcome {
            SubmitOutcome::Added => "add",
            SubmitOutcome::Updated { .. } => "update",
        };
        info!(
            "event=contact_submit module=service status=ok action={action} count={}",
            self.contacts.len()
        );
        Ok(outcome)
    }

    /// Removes the contact with `email`. Returns whether one was removed.
    pub fn delete_contact(&mut self, email: &str) -> BookResult<bool> {
        if self.find_by_email(email).is_none() {
            info!("event=contact_delete module=service status=ok removed=false");
            return Ok(false);
        }

        let next = self
            .contacts
            .iter()
            .filter(|contact| contact.email != email)
            .cloned()
            .collect::<Vec<_>>();
        self.commit(next)?;

        info!(
            "event=contact_delete module=service status=ok removed=true count={}",
            self.contacts.len()
        );
        Ok(true)
    }

    /// Writes the current collection to storage.
    pub fn save(&mut self) -> BookResult<()> {
        self.repo.save_contacts(&self.contacts)?;
        Ok(())
    }

    /// Contacts passing the current search term and letter filter, in
    /// stored order.
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.filter.apply(&self.contacts)
    }

    /// Filtered contacts shaped and sorted for display.
    pub fn list_rows(&self) -> Vec<ContactRow> {
        render_rows(self.filtered_contacts())
    }

    /// Current warning, hidden once its lifetime is over.
    pub fn visible_warning(&self) -> Option<&Notice> {
        self.warning.visible(self.clock.now())
    }

    /// Clears the warning identified by `token`; stale tokens are ignored.
    pub fn dismiss_warning(&mut self, token: NoticeToken) -> bool {
        self.warning.dismiss(token)
    }

    /// Applies a gesture coming from a list row.
    pub fn apply_list_intent(&mut self, intent: ListIntent) -> BookResult<()> {
        match intent {
            ListIntent::Edit(contact) => self.start_editing(contact),
            ListIntent::Delete { email } => {
                self.delete_contact(&email)?;
            }
        }
        Ok(())
    }

    /// Applies an intent emitted by the form.
    pub fn apply_form_intent(&mut self, intent: FormIntent) -> BookResult<FormOutcome> {
        match intent {
            FormIntent::Submit(contact) => self.submit_contact(contact).map(FormOutcome::Submitted),
            FormIntent::Close => {
                self.close_modal();
                Ok(FormOutcome::Closed)
            }
        }
    }

    fn commit(&mut self, next: Vec<Contact>) -> BookResult<()> {
        self.repo.save_contacts(&next).inspect_err(|err| {
            warn!("event=contacts_save module=service status=error error={err}");
        })?;
        self.contacts = next;
        Ok(())
    }
}
