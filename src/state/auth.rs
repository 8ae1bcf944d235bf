//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The [`SessionStore`] remains
//! the source of truth; [`AuthState`] is a reactive copy refreshed on every
//! store mutation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::net::types::User;
use crate::session::{Session, SessionPhase, SessionStore};

/// Reactive snapshot of the session plus a loading flag.
///
/// `loading` is true while a persisted credential has not been resolved to
/// an identity yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: Session) -> Self {
        let loading = session.phase() == SessionPhase::Pending;
        Self { session, loading }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }
}

/// Session context shared through Leptos.
///
/// The store is single-threaded (`Rc`), so it lives in local arena storage;
/// the handle itself is `Copy`.
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<SessionStore, LocalStorage>,
    pub state: RwSignal<AuthState>,
}

impl AuthContext {
    /// Wrap a store and mirror its mutations into `state`.
    ///
    /// The mirror is removed from the store when the current owner is
    /// cleaned up.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let state = RwSignal::new(AuthState::from_session(store.session()));
        let subscription = store.subscribe(move |session| {
            let _ = state.try_set(AuthState::from_session(session.clone()));
        });
        let store = StoredValue::new_local(store);
        on_cleanup(move || {
            store.try_with_value(|store| store.unsubscribe(subscription));
        });
        Self { store, state }
    }

    #[must_use]
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }
}

/// Provide the session context to the component tree.
pub fn provide_session(store: SessionStore) -> AuthContext {
    let auth = AuthContext::new(store);
    provide_context(auth);
    auth
}

/// Fetch the session context provided by [`provide_session`].
pub fn use_session() -> Option<AuthContext> {
    use_context::<AuthContext>()
}
