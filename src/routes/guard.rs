//! Navigation guard run before every route transition.
//!
//! ARCHITECTURE
//! ============
//! 1. Hydrate: a persisted credential with no loaded identity is resolved
//!    first, so the decision never sees a half-restored session.
//! 2. Evaluate the target's policy, first failing rule wins:
//!    auth-required, then guest-only, then admin-required.
//!
//! Overlapping navigations each hydrate independently and observe whatever
//! the shared store holds; hydration is idempotent and converges.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::policy::{AppRoute, RoutePolicy, policy_for_path};
use crate::session::{Session, SessionStore};

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(AppRoute),
}

impl NavigationDecision {
    /// Path to navigate to instead, if redirected.
    #[must_use]
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Redirect(route) => Some(route.path()),
        }
    }
}

/// Decide a navigation against an already-hydrated session.
#[must_use]
pub fn evaluate(policy: RoutePolicy, session: &Session) -> NavigationDecision {
    if policy.requires_auth && !session.is_authenticated() {
        NavigationDecision::Redirect(AppRoute::LOGIN)
    } else if policy.guest_only && session.is_authenticated() {
        NavigationDecision::Redirect(AppRoute::LANDING)
    } else if policy.requires_admin && !session.is_admin() {
        NavigationDecision::Redirect(AppRoute::LANDING)
    } else {
        NavigationDecision::Allow
    }
}

/// Guard bound to the client's session store.
#[derive(Clone)]
pub struct NavigationGuard {
    store: SessionStore,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Hydrate if needed, then decide the navigation.
    pub async fn check(&self, policy: RoutePolicy) -> NavigationDecision {
        self.store.hydrate().await;
        let decision = evaluate(policy, &self.store.session());
        log::debug!("navigation {policy:?} -> {decision:?}");
        decision
    }

    /// [`NavigationGuard::check`] for a location path.
    pub async fn check_path(&self, path: &str) -> NavigationDecision {
        self.check(policy_for_path(path)).await
    }
}
