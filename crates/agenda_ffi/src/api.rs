//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the contact book to Dart via FRB as intent-level functions.
//! - Own the single process-wide session a UI host drives.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutating call reports through an envelope instead of an error type.
//! - Calls made before `contacts_open` fail with a stable message.

use agenda_core::{
    alphabet, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, AgendaConfig, BookError, Clock, Contact, ContactBook, ContactForm,
    FormOutcome, KvContactRepository, LetterFilter, SqliteKeyValueStore, SubmitOutcome,
};
use log::{error, info};
use std::sync::{Mutex, MutexGuard};

const SESSION_NOT_OPEN: &str = "contacts session is not open";
const PHONE_DIGITS_ONLY: &str = "phone must contain digits only";

type SessionBook = ContactBook<KvContactRepository<SqliteKeyValueStore>>;

static SESSION: Mutex<Option<SessionBook>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Human-readable message for the UI.
    pub message: String,
    /// Token of the warning raised by this call, for scheduling dismissal.
    pub warning_token: Option<u64>,
    /// Milliseconds until that warning hides itself.
    pub warning_ttl_ms: Option<u64>,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            warning_token: None,
            warning_ttl_ms: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            warning_token: None,
            warning_ttl_ms: None,
        }
    }
}

/// One rendered contact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowItem {
    /// Stable list key (the contact email).
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar_url: String,
}

/// Full screen state for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactScreenState {
    /// Filtered rows, sorted by name.
    pub rows: Vec<ContactRowItem>,
    /// Visible warning text, if any.
    pub warning: Option<String>,
    pub search_term: String,
    /// `All` or a single uppercase letter.
    pub letter: String,
    pub modal_open: bool,
    /// Modal title for the current mode.
    pub form_title: String,
    /// Submit button label for the current mode.
    pub form_submit_label: String,
    /// Pre-populated form fields (empty in create mode).
    pub form_name: String,
    pub form_email: String,
    pub form_phone: String,
}

/// Opens the contact session.
///
/// `db_path` falls back to `AGENDA_DB_PATH`, then to the temp directory.
/// Reopening replaces the current session.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_open(db_path: Option<String>) -> ContactActionResponse {
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(Into::into)
        .unwrap_or_else(|| AgendaConfig::from_env().db_path);

    let store = match SqliteKeyValueStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            error!("event=ffi_open module=ffi status=error error_code=store_open_failed");
            return ContactActionResponse::failure(format!("contacts_open failed: {err}"));
        }
    };
    let book = match ContactBook::load(KvContactRepository::new(store)) {
        Ok(book) => book,
        Err(err) => {
            error!("event=ffi_open module=ffi status=error error_code=book_load_failed");
            return ContactActionResponse::failure(format!("contacts_open failed: {err}"));
        }
    };

    let count = book.len();
    *lock_session() = Some(book);
    info!("event=ffi_open module=ffi status=ok count={count}");
    ContactActionResponse::success(format!("Loaded {count} contact(s)."))
}

/// Drops the current session, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_close() {
    *lock_session() = None;
}

/// Returns the state needed to render the screen.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_screen() -> Option<ContactScreenState> {
    with_book(|book| {
        let form = book.open_form();
        ContactScreenState {
            rows: book
                .list_rows()
                .into_iter()
                .map(|row| ContactRowItem {
                    key: row.key,
                    name: row.name,
                    email: row.email,
                    phone: row.phone,
                    avatar_url: row.avatar_url,
                })
                .collect(),
            warning: book.visible_warning().map(|notice| notice.message.clone()),
            search_term: book.filter().search_term.clone(),
            letter: book.filter().letter.to_string(),
            modal_open: book.is_modal_open(),
            form_title: form.title().to_string(),
            form_submit_label: form.submit_label().to_string(),
            form_name: form.name().to_string(),
            form_email: form.email().to_string(),
            form_phone: form.phone().to_string(),
        }
    })
}

/// Updates the name search term.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_set_search(term: String) -> ContactActionResponse {
    with_book(|book| {
        book.set_search_term(term);
        ContactActionResponse::success("")
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Selects `All` or a single letter of the alphabet bar.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_set_letter(letter: String) -> ContactActionResponse {
    let letter = match letter.parse::<LetterFilter>() {
        Ok(letter) => letter,
        Err(message) => return ContactActionResponse::failure(message),
    };
    with_book(|book| {
        book.set_letter_filter(letter);
        ContactActionResponse::success("")
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Letters shown on the alphabet bar, preceded by `All`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_alphabet() -> Vec<String> {
    std::iter::once(LetterFilter::All.to_string())
        .chain(alphabet().map(String::from))
        .collect()
}

/// Returns whether `value` may replace the phone field content.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_accepts_phone_input(value: String) -> bool {
    agenda_core::view::contact_form::is_phone_input(&value)
}

/// Opens the modal in create mode.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_start_create() -> ContactActionResponse {
    with_book(|book| {
        book.start_creating();
        ContactActionResponse::success("")
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Opens the modal editing the contact with `email`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_start_edit(email: String) -> ContactActionResponse {
    with_book(|book| match book.find_by_email(&email).cloned() {
        Some(contact) => {
            book.start_editing(contact);
            ContactActionResponse::success("")
        }
        None => ContactActionResponse::failure("contact not found"),
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Closes the modal, cancelling any edit.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_close_modal() -> ContactActionResponse {
    with_book(|book| {
        book.close_modal();
        ContactActionResponse::success("")
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Submits the modal fields.
///
/// # FFI contract
/// - Empty fields fail with `All fields are required`.
/// - Duplicates fail with the warning text and carry a `warning_token`.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_submit(name: String, email: String, phone: String) -> ContactActionResponse {
    let mut form = ContactForm::new();
    form.set_name(name);
    form.set_email(email);
    if !form.set_phone(&phone) {
        return ContactActionResponse::failure(PHONE_DIGITS_ONLY);
    }
    let intent = match form.submit() {
        Ok(intent) => intent,
        Err(err) => return ContactActionResponse::failure(err.to_string()),
    };

    with_book(|book| match book.apply_form_intent(intent) {
        Ok(FormOutcome::Submitted(SubmitOutcome::Added)) => {
            ContactActionResponse::success("Contact added.")
        }
        Ok(FormOutcome::Submitted(SubmitOutcome::Updated { .. })) => {
            ContactActionResponse::success("Contact updated.")
        }
        Ok(FormOutcome::Closed) => ContactActionResponse::success(""),
        Err(BookError::Duplicate { notice }) => {
            let now = book.clock().now();
            let remaining = book
                .visible_warning()
                .filter(|visible| visible.token == notice)
                .map(|visible| visible.remaining(now));
            ContactActionResponse {
                ok: false,
                message: BookError::Duplicate { notice }.to_string(),
                warning_token: Some(notice.as_raw()),
                warning_ttl_ms: remaining
                    .map(|left| u64::try_from(left.as_millis()).unwrap_or(u64::MAX)),
            }
        }
        Err(err) => ContactActionResponse::failure(err.to_string()),
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Deletes the contact with `email`; unknown emails succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(email: String) -> ContactActionResponse {
    with_book(|book| match book.delete_contact(&email) {
        Ok(true) => ContactActionResponse::success("Contact deleted."),
        Ok(false) => ContactActionResponse::success("No contact with that email."),
        Err(err) => ContactActionResponse::failure(err.to_string()),
    })
    .unwrap_or_else(|| ContactActionResponse::failure(SESSION_NOT_OPEN))
}

/// Dismisses the warning raised with `token`. Stale tokens are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_dismiss_warning(token: u64) -> bool {
    with_book(|book| book.dismiss_warning(agenda_core::NoticeToken::from_raw(token)))
        .unwrap_or(false)
}

/// Returns all stored contacts in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_export() -> Vec<ContactRowItem> {
    with_book(|book| {
        book.contacts()
            .iter()
            .map(|contact: &Contact| ContactRowItem {
                key: contact.email.clone(),
                name: contact.name.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                avatar_url: agenda_core::avatar_url(&contact.name),
            })
            .collect()
    })
    .unwrap_or_default()
}

fn lock_session() -> MutexGuard<'static, Option<SessionBook>> {
    // A panic while holding the lock must not brick the session for the host.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_book<T>(f: impl FnOnce(&mut SessionBook) -> T) -> Option<T> {
    let mut session = lock_session();
    session.as_mut().map(f)
}

#[cfg(test)]
mod tests {
    use super::{
        contacts_accepts_phone_input, contacts_alphabet, contacts_close, contacts_delete,
        contacts_dismiss_warning, contacts_export, contacts_open, contacts_screen,
        contacts_set_letter, contacts_set_search, contacts_start_edit, contacts_submit,
        core_version, init_logging, ping,
    };
    use std::sync::Mutex;

    // Tests share the process-wide session.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn alphabet_starts_with_all() {
        let letters = contacts_alphabet();
        assert_eq!(letters.len(), 27);
        assert_eq!(letters[0], "All");
        assert_eq!(letters[1], "A");
        assert_eq!(letters[26], "Z");
    }

    #[test]
    fn phone_input_accepts_digits_only() {
        assert!(contacts_accepts_phone_input("0123".to_string()));
        assert!(!contacts_accepts_phone_input("12a3".to_string()));
    }

    #[test]
    fn calls_before_open_report_missing_session() {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        contacts_close();

        assert!(contacts_screen().is_none());
        let response = contacts_delete("anna@example.com".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not open"));
    }

    #[test]
    fn session_flow_add_duplicate_edit_delete() {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("ffi.db");

        let opened = contacts_open(Some(db_path.to_str().unwrap().to_string()));
        assert!(opened.ok, "{}", opened.message);

        let added = contacts_submit(
            "Anna Smith".to_string(),
            "anna@example.com".to_string(),
            "111".to_string(),
        );
        assert!(added.ok, "{}", added.message);
        let added = contacts_submit(
            "Bob Jones".to_string(),
            "bob@example.com".to_string(),
            "222".to_string(),
        );
        assert!(added.ok, "{}", added.message);

        let duplicate = contacts_submit(
            "Anna Smith".to_string(),
            "other@example.com".to_string(),
            "333".to_string(),
        );
        assert!(!duplicate.ok);
        let token = duplicate.warning_token.unwrap();
        let ttl_ms = duplicate.warning_ttl_ms.unwrap();
        assert!(ttl_ms > 0 && ttl_ms <= 3_000, "ttl {ttl_ms}");
        assert_eq!(
            contacts_screen().unwrap().warning.as_deref(),
            Some("Contact already exists")
        );
        assert!(contacts_dismiss_warning(token));
        assert!(contacts_screen().unwrap().warning.is_none());

        let missing = contacts_submit(String::new(), "x@example.com".to_string(), "1".to_string());
        assert_eq!(missing.message, "All fields are required");
        let bad_phone = contacts_submit("X".to_string(), "x@example.com".to_string(), "1a".to_string());
        assert!(!bad_phone.ok);

        assert!(contacts_start_edit("anna@example.com".to_string()).ok);
        let screen = contacts_screen().unwrap();
        assert!(screen.modal_open);
        assert_eq!(screen.form_title, "Edit contact");
        assert_eq!(screen.form_phone, "111");
        let updated = contacts_submit(
            "Anna Smith".to_string(),
            "anna@example.com".to_string(),
            "999".to_string(),
        );
        assert!(updated.ok, "{}", updated.message);
        assert!(!contacts_screen().unwrap().modal_open);

        assert!(contacts_set_letter("b".to_string()).ok);
        assert!(contacts_set_search("jon".to_string()).ok);
        let screen = contacts_screen().unwrap();
        assert_eq!(screen.letter, "B");
        assert_eq!(screen.rows.len(), 1);
        assert_eq!(screen.rows[0].key, "bob@example.com");

        assert!(contacts_delete("bob@example.com".to_string()).ok);
        let exported = contacts_export();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].phone, "999");

        contacts_close();
        let reopened = contacts_open(Some(db_path.to_str().unwrap().to_string()));
        assert!(reopened.ok);
        assert_eq!(contacts_export().len(), 1);
        contacts_close();
    }
}
