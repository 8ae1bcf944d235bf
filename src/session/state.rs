//! Session value type and its derived authorization facts.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::net::types::User;

/// Coarse lifecycle position of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No credential held.
    #[default]
    Anonymous,
    /// Credential held, identity not yet loaded (e.g. after a reload).
    Pending,
    /// Credential and identity both present.
    Authenticated,
}

/// Identity/credential pair.
///
/// Derived flags are computed on read, never stored, so they cannot drift
/// from the two fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) user: Option<User>,
    pub(crate) credential: Option<String>,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.credential.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.credential, &self.user) {
            (None, _) => SessionPhase::Anonymous,
            (Some(_), None) => SessionPhase::Pending,
            (Some(_), Some(_)) => SessionPhase::Authenticated,
        }
    }
}
