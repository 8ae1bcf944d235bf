use super::*;
use crate::session::storage::MemoryStorage;
use crate::test_support::sample_user;

fn open(storage: &Rc<MemoryStorage>) -> SessionCell {
    SessionCell::open(storage.clone(), "token")
}

// =============================================================================
// open
// =============================================================================

#[test]
fn open_without_persisted_credential_is_anonymous() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    assert_eq!(cell.phase(), SessionPhase::Anonymous);
    assert_eq!(cell.authorization_header(), None);
}

#[test]
fn open_with_persisted_credential_is_pending() {
    let storage = Rc::new(MemoryStorage::with_entry("token", "tok-123"));
    let cell = open(&storage);
    assert_eq!(cell.phase(), SessionPhase::Pending);
    assert_eq!(cell.credential().as_deref(), Some("tok-123"));
    assert_eq!(cell.authorization_header().as_deref(), Some("Bearer tok-123"));
}

// =============================================================================
// credential mutators
// =============================================================================

#[test]
fn set_credential_writes_memory_and_slot() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.set_credential("tok-1");
    assert_eq!(cell.credential().as_deref(), Some("tok-1"));
    assert_eq!(storage.get("token").as_deref(), Some("tok-1"));
}

#[test]
fn clear_credential_removes_memory_and_slot() {
    let storage = Rc::new(MemoryStorage::with_entry("token", "tok-1"));
    let cell = open(&storage);
    cell.clear_credential();
    assert_eq!(cell.credential(), None);
    assert_eq!(storage.get("token"), None);
    assert_eq!(cell.authorization_header(), None);
}

#[test]
fn set_credential_with_new_token_drops_user() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.set_credential("tok-a");
    cell.set_user(sample_user(1, crate::net::types::Role::Admin));

    cell.set_credential("tok-b");

    assert_eq!(cell.user(), None);
    assert_eq!(cell.phase(), SessionPhase::Pending);
    assert!(!cell.snapshot().is_admin());
}

#[test]
fn set_credential_with_same_token_keeps_user() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.set_credential("tok-a");
    cell.set_user(sample_user(1, crate::net::types::Role::User));

    cell.set_credential("tok-a");

    assert_eq!(cell.user().map(|u| u.id), Some(1));
}

#[test]
fn restore_credential_does_not_touch_slot() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.restore_credential("tok-9");
    assert_eq!(cell.credential().as_deref(), Some("tok-9"));
    assert_eq!(storage.get("token"), None);
}

// =============================================================================
// invalidate
// =============================================================================

#[test]
fn invalidate_clears_everything_and_records_reason() {
    let storage = Rc::new(MemoryStorage::with_entry("token", "tok-1"));
    let cell = open(&storage);
    cell.set_user(sample_user(1, crate::net::types::Role::User));
    assert_eq!(cell.phase(), SessionPhase::Authenticated);

    cell.invalidate(InvalidationReason::Unauthorized);

    assert_eq!(cell.snapshot(), Session::default());
    assert_eq!(storage.get("token"), None);
    assert_eq!(cell.last_invalidation(), Some(InvalidationReason::Unauthorized));
}

#[test]
fn invalidate_if_current_skips_superseded_credential() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.set_credential("fresh");

    assert!(!cell.invalidate_if_current(Some("stale"), InvalidationReason::Unauthorized));
    assert_eq!(cell.credential().as_deref(), Some("fresh"));
    assert_eq!(storage.get("token").as_deref(), Some("fresh"));
}

#[test]
fn invalidate_if_current_applies_to_matching_credential() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    cell.set_credential("tok");

    assert!(cell.invalidate_if_current(Some("tok"), InvalidationReason::Unauthorized));
    assert_eq!(cell.phase(), SessionPhase::Anonymous);
}

// =============================================================================
// subscribe
// =============================================================================

#[test]
fn subscribers_see_snapshot_after_each_mutation() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    let seen: Rc<RefCell<Vec<SessionPhase>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    cell.subscribe(move |s| sink.borrow_mut().push(s.phase()));

    cell.set_credential("tok");
    cell.set_user(sample_user(1, crate::net::types::Role::User));
    cell.invalidate(InvalidationReason::Logout);

    assert_eq!(
        *seen.borrow(),
        vec![SessionPhase::Pending, SessionPhase::Authenticated, SessionPhase::Anonymous]
    );
}

#[test]
fn subscriber_may_read_cell_reentrantly() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    let reader = cell.clone();
    let observed = Rc::new(RefCell::new(None));
    let sink = observed.clone();
    cell.subscribe(move |_| *sink.borrow_mut() = reader.credential());

    cell.set_credential("tok");

    assert_eq!(observed.borrow().as_deref(), Some("tok"));
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let storage = Rc::new(MemoryStorage::new());
    let cell = open(&storage);
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let id = cell.subscribe(move |_| sink.set(sink.get() + 1));

    cell.set_credential("tok");
    assert!(cell.unsubscribe(id));
    cell.clear_credential();

    assert_eq!(calls.get(), 1);
    assert_eq!(cell.subscriber_count(), 0);
    assert!(!cell.unsubscribe(id));
}
