//! Session store: login, identity hydration, and logout.
//!
//! ARCHITECTURE
//! ============
//! `Anonymous -> Pending -> Authenticated -> Anonymous`. The store drives the
//! transitions through the shared [`SessionCell`] and talks to the server only
//! through its [`RequestGateway`], so identity calls are authorized and 401s
//! are handled the same way as for every other call.
//!
//! CONCURRENCY
//! ===========
//! Operations suspend only at the network call. Another operation may run in
//! that window, so results are applied only if the credential they were
//! obtained with is still the held one; otherwise the later writer wins.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use super::cell::{SessionCell, SubscriptionId};
use super::state::{Session, SessionPhase};
use super::storage::CredentialStorage;
use crate::config::ClientConfig;
use crate::error::{AuthenticationError, InvalidationReason};
use crate::net::api;
use crate::net::gateway::RequestGateway;
use crate::net::transport::Transport;
use crate::net::types::User;

/// Cloneable handle to the client's single session.
#[derive(Clone)]
pub struct SessionStore {
    cell: SessionCell,
    gateway: RequestGateway,
    retain_credential_on_network_error: bool,
}

impl SessionStore {
    /// Build a store, reading the persisted credential once.
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>, storage: Rc<dyn CredentialStorage>, config: &ClientConfig) -> Self {
        let cell = SessionCell::open(storage, &config.token_storage_key);
        let gateway = RequestGateway::new(transport, cell.clone());
        Self { cell, gateway, retain_credential_on_network_error: config.retain_credential_on_network_error }
    }

    /// Store backed by `fetch` and `localStorage`.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn browser(config: &ClientConfig) -> Self {
        use crate::net::transport::BrowserTransport;
        use crate::session::storage::BrowserStorage;

        Self::new(Rc::new(BrowserTransport::new(config)), Rc::new(BrowserStorage), config)
    }

    /// Gateway for other API clients; shares this store's session.
    #[must_use]
    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> Session {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.cell.user()
    }

    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.cell.credential()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cell.snapshot().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.cell.snapshot().is_admin()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.cell.phase()
    }

    #[must_use]
    pub fn last_invalidation(&self) -> Option<InvalidationReason> {
        self.cell.last_invalidation()
    }

    /// Register a listener called after every session mutation.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        self.cell.subscribe(listener)
    }

    /// Remove a listener registered with [`SessionStore::subscribe`].
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.cell.unsubscribe(id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.cell.subscriber_count()
    }

    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// Hold `token` in memory and in the persistent slot; outgoing calls carry
    /// it from now on. A different token drops the loaded user.
    pub fn set_credential(&self, token: &str) {
        self.cell.set_credential(token);
    }

    /// Drop the credential; outgoing calls stop carrying it.
    pub fn clear_credential(&self) {
        self.cell.clear_credential();
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Exchange credentials for a token, then load the identity behind it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] when the exchange is rejected or
    /// unreachable, or when the issued token does not resolve to an identity.
    /// The session is anonymous after any failure.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<(), AuthenticationError> {
        let token = match api::exchange_credentials(&self.gateway, identifier, secret).await {
            Ok(token) => token,
            Err(err) => {
                self.cell.invalidate(InvalidationReason::LoginFailed);
                log::warn!("login failed: {err}");
                return Err(err.into());
            }
        };

        let access_token = token.access_token.trim();
        if access_token.is_empty() {
            self.cell.invalidate(InvalidationReason::LoginFailed);
            log::warn!("login failed: empty access token");
            return Err(AuthenticationError::MalformedResponse("empty access_token".to_owned()));
        }

        self.cell.set_credential(access_token);
        self.fetch_user().await;

        let still_current = self.cell.credential().as_deref() == Some(access_token);
        match self.cell.user() {
            Some(user) if still_current => {
                log::info!("login succeeded for user {}", user.id);
                Ok(())
            }
            _ => {
                if still_current {
                    self.cell.invalidate(InvalidationReason::LoginFailed);
                }
                log::warn!("login failed: no identity for issued token");
                Err(AuthenticationError::IdentityUnavailable)
            }
        }
    }

    /// Load the identity for the held credential.
    ///
    /// No-op without a credential. Any failure resets the session to
    /// anonymous and is logged, never returned; unreachable-server failures
    /// keep the credential when configured to.
    pub async fn fetch_user(&self) {
        let Some(credential) = self.cell.credential() else {
            return;
        };

        match api::fetch_current_user(&self.gateway).await {
            Ok(user) => {
                if self.cell.credential().as_deref() == Some(credential.as_str()) {
                    self.cell.set_user(user);
                } else {
                    log::debug!("identity response for superseded credential discarded");
                }
            }
            Err(err) if err.is_transport() && self.retain_credential_on_network_error => {
                log::warn!("failed to fetch user, keeping credential: {err}");
            }
            Err(err) => {
                let reason = InvalidationReason::for_identity_failure(&err);
                self.cell.invalidate_if_current(Some(credential.as_str()), reason);
                log::warn!("failed to fetch user ({}): {err}", reason.as_str());
            }
        }
    }

    /// Rebuild the in-memory identity from a persisted credential.
    ///
    /// Runs only when the slot holds a credential and no user is loaded.
    /// Returns whether an identity fetch was attempted.
    pub async fn hydrate(&self) -> bool {
        if self.cell.has_user() {
            return false;
        }
        let Some(persisted) = self.cell.persisted_credential() else {
            return false;
        };
        if self.cell.credential().is_none() {
            self.cell.restore_credential(&persisted);
        }
        log::debug!("hydrating session from persisted credential");
        self.fetch_user().await;
        true
    }

    /// Forget the user and the credential. Idempotent.
    pub fn logout(&self) {
        let was_authenticated = self.is_authenticated();
        self.cell.invalidate(InvalidationReason::Logout);
        if was_authenticated {
            log::info!("logged out");
        }
    }
}
