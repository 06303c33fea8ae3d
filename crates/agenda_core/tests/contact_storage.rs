use agenda_core::{
    Contact, ContactRepository, KvContactRepository, MemoryKeyValueStore, RepoError,
    SqliteKeyValueStore, CONTACTS_SLOT_KEY,
};

#[test]
fn absent_slot_loads_as_empty_collection() {
    let repo = KvContactRepository::new(MemoryKeyValueStore::new());
    assert!(repo.load_contacts().unwrap().is_empty());
}

#[test]
fn saved_collection_uses_plain_json_array() {
    let mut repo = KvContactRepository::new(MemoryKeyValueStore::new());
    let contacts = vec![Contact::new("Anna Smith", "anna@example.com", "555")];
    repo.save_contacts(&contacts).unwrap();

    let raw = agenda_core::KeyValueStore::get(repo.store(), CONTACTS_SLOT_KEY)
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "Anna Smith", "email": "anna@example.com", "phone": "555"}
        ])
    );
}

#[test]
fn malformed_slot_is_reported_as_invalid_data() {
    let store = MemoryKeyValueStore::with_slot(CONTACTS_SLOT_KEY, "{not json");
    let repo = KvContactRepository::new(store);

    let err = repo.load_contacts().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn slot_with_wrong_shape_is_reported_as_invalid_data() {
    let store = MemoryKeyValueStore::with_slot(CONTACTS_SLOT_KEY, r#"[{"name":"Anna"}]"#);
    let repo = KvContactRepository::new(store);

    assert!(matches!(
        repo.load_contacts(),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn sqlite_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    let contacts = vec![
        Contact::new("Bob Jones", "bob@example.com", "222"),
        Contact::new("Anna Smith", "anna@example.com", "111"),
    ];
    {
        let store = SqliteKeyValueStore::open(&path).unwrap();
        let mut repo = KvContactRepository::new(store);
        repo.save_contacts(&contacts).unwrap();
    }

    let repo = KvContactRepository::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(repo.load_contacts().unwrap(), contacts);
}
