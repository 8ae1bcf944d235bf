use super::*;

#[test]
fn memory_storage_starts_empty() {
    assert_eq!(MemoryStorage::new().get("token"), None);
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set("token", "tok-1");
    assert_eq!(storage.get("token").as_deref(), Some("tok-1"));

    storage.set("token", "tok-2");
    assert_eq!(storage.get("token").as_deref(), Some("tok-2"));

    storage.remove("token");
    assert_eq!(storage.get("token"), None);
}

#[test]
fn memory_storage_remove_missing_is_noop() {
    let storage = MemoryStorage::with_entry("other", "x");
    storage.remove("token");
    assert_eq!(storage.get("other").as_deref(), Some("x"));
}
