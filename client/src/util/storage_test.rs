use super::*;

fn make_user() -> User {
    User {
        id: "u-1".to_owned(),
        email: "test@example.com".to_owned(),
        name: "Asha Rao".to_owned(),
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k"), None);
    storage.set("k", "v");
    assert_eq!(storage.get("k").as_deref(), Some("v"));
    storage.remove("k");
    assert_eq!(storage.get("k"), None);
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    storage.set("k", "v");
    assert_eq!(other.get("k").as_deref(), Some("v"));
}

#[test]
fn read_session_empty_when_nothing_persisted() {
    assert_eq!(read_session(&MemoryStorage::new()), StoredSession::Empty);
}

#[test]
fn persist_then_read_restores_same_user() {
    let storage = MemoryStorage::new();
    persist_session(&storage, "tok-1", &make_user()).unwrap();
    assert_eq!(
        read_session(&storage),
        StoredSession::Restored { token: "tok-1".to_owned(), user: make_user() }
    );
}

#[test]
fn read_session_corrupt_on_bad_json() {
    let storage = MemoryStorage::new();
    storage.set(AUTH_TOKEN_KEY, "tok-1");
    storage.set(USER_DATA_KEY, "{not json");
    assert_eq!(read_session(&storage), StoredSession::Corrupt);
}

#[test]
fn read_session_corrupt_when_token_has_no_user() {
    let storage = MemoryStorage::new();
    storage.set(AUTH_TOKEN_KEY, "tok-1");
    assert_eq!(read_session(&storage), StoredSession::Corrupt);
}

#[test]
fn clear_session_removes_both_keys() {
    let storage = MemoryStorage::new();
    persist_session(&storage, "tok-1", &make_user()).unwrap();
    clear_session(&storage);
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
}

#[test]
fn stored_token_ignores_empty_value() {
    let storage = MemoryStorage::new();
    storage.set(AUTH_TOKEN_KEY, "");
    assert_eq!(stored_token(&storage), None);
    storage.set(AUTH_TOKEN_KEY, "tok-2");
    assert_eq!(stored_token(&storage).as_deref(), Some("tok-2"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_browser() {
    let storage = BrowserStorage;
    storage.set("k", "v");
    assert_eq!(storage.get("k"), None);
}
