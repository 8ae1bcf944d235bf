//! Shared session cell: the single in-memory session plus its persisted
//! credential mirror.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store and the request gateway both hold a clone of the same cell. The
//! gateway only reads the credential and invalidates; the store performs
//! every other mutation. Subscribers are notified after each mutation with a
//! fresh snapshot.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded: interior mutability through `RefCell`. No borrow is held
//! across an await point or while subscribers run, so a listener may read the
//! cell again.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::state::{Session, SessionPhase};
use super::storage::CredentialStorage;
use crate::error::InvalidationReason;
use crate::net::types::User;

type Listener = Rc<dyn Fn(&Session)>;

/// Key returned by [`SessionCell::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cloneable handle to the shared session.
#[derive(Clone)]
pub struct SessionCell {
    inner: Rc<CellInner>,
}

struct CellInner {
    storage: Rc<dyn CredentialStorage>,
    key: String,
    session: RefCell<Session>,
    last_invalidation: Cell<Option<InvalidationReason>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl SessionCell {
    /// Open the cell, reading the persisted credential once.
    ///
    /// A persisted credential puts the session in the pending phase.
    #[must_use]
    pub fn open(storage: Rc<dyn CredentialStorage>, key: &str) -> Self {
        let credential = storage.get(key);
        Self {
            inner: Rc::new(CellInner {
                storage,
                key: key.to_owned(),
                session: RefCell::new(Session { user: None, credential }),
                last_invalidation: Cell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.inner.session.borrow().credential.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.session.borrow().user.clone()
    }

    #[must_use]
    pub fn has_user(&self) -> bool {
        self.inner.session.borrow().user.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.inner.session.borrow().phase()
    }

    /// Read the persistent slot directly.
    #[must_use]
    pub fn persisted_credential(&self) -> Option<String> {
        self.inner.storage.get(&self.inner.key)
    }

    /// `Bearer <credential>` while a credential is held.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.inner.session.borrow().credential.as_ref().map(|c| format!("Bearer {c}"))
    }

    #[must_use]
    pub fn last_invalidation(&self) -> Option<InvalidationReason> {
        self.inner.last_invalidation.get()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Store a credential in memory and in the persistent slot.
    ///
    /// A different credential drops the loaded user; the user always belongs
    /// to the held credential.
    pub fn set_credential(&self, token: &str) {
        self.replace_credential(token);
        self.inner.storage.set(&self.inner.key, token);
        self.publish();
    }

    /// Adopt a credential already present in the slot without rewriting it.
    pub(crate) fn restore_credential(&self, token: &str) {
        self.replace_credential(token);
        self.publish();
    }

    fn replace_credential(&self, token: &str) {
        let mut session = self.inner.session.borrow_mut();
        if session.credential.as_deref() != Some(token) {
            session.user = None;
        }
        session.credential = Some(token.to_owned());
    }

    /// Drop the credential from memory and from the persistent slot.
    pub fn clear_credential(&self) {
        self.inner.session.borrow_mut().credential = None;
        self.inner.storage.remove(&self.inner.key);
        self.publish();
    }

    pub(crate) fn set_user(&self, user: User) {
        self.inner.session.borrow_mut().user = Some(user);
        self.publish();
    }

    /// Reset to anonymous: user, credential, and slot are cleared together.
    pub fn invalidate(&self, reason: InvalidationReason) {
        {
            let mut session = self.inner.session.borrow_mut();
            session.user = None;
            session.credential = None;
        }
        self.inner.storage.remove(&self.inner.key);
        self.inner.last_invalidation.set(Some(reason));
        self.publish();
    }

    /// Invalidate only if the held credential is still `observed`.
    ///
    /// Guards against a late failure for a superseded credential wiping a
    /// session established in the meantime. Returns whether it invalidated.
    pub fn invalidate_if_current(&self, observed: Option<&str>, reason: InvalidationReason) -> bool {
        if self.credential().as_deref() != observed {
            return false;
        }
        self.invalidate(reason);
        true
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    /// Register a listener called with a snapshot after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(key, _)| *key != id);
        listeners.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self.inner.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
