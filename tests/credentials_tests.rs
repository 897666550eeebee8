use commit_genius::credentials::{CredentialStore, FileCredentialStore, OPENROUTER_KEY};

#[test]
fn get_returns_none_before_any_set() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileCredentialStore::with_path(dir.path().join("credentials.toml"));

    assert!(store.get(OPENROUTER_KEY).expect("get").is_none());
}

#[test]
fn set_then_get_roundtrips_and_creates_parent_dirs() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileCredentialStore::with_path(dir.path().join("nested").join("credentials.toml"));

    store.set(OPENROUTER_KEY, "sk-or-abc123").expect("set");
    assert_eq!(
        store.get(OPENROUTER_KEY).expect("get").as_deref(),
        Some("sk-or-abc123")
    );
}

#[test]
fn set_overwrites_without_clobbering_other_keys() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = FileCredentialStore::with_path(dir.path().join("credentials.toml"));

    store.set("other-service", "tok").expect("set other");
    store.set(OPENROUTER_KEY, "sk-or-old").expect("set");
    store.set(OPENROUTER_KEY, "sk-or-new").expect("overwrite");

    assert_eq!(
        store.get(OPENROUTER_KEY).expect("get").as_deref(),
        Some("sk-or-new")
    );
    assert_eq!(store.get("other-service").expect("get").as_deref(), Some("tok"));
}

#[cfg(unix)]
#[test]
fn credential_file_is_owner_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("credentials.toml");
    let store = FileCredentialStore::with_path(path.clone());
    store.set(OPENROUTER_KEY, "sk-or-abc").expect("set");

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
