//! # hr-client
//!
//! Session and navigation-authorization core for the HR portal browser
//! client (attendance, leave, salary, and user administration).
//!
//! The crate keeps the client's belief about who is logged in, mirrors the
//! bearer credential into browser storage, attaches it to outbound API calls,
//! reacts to server-reported authorization failures, and gates every route
//! transition against a declarative per-route policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the identity/credential pair, `net` wraps every outbound
//! call, and `routes` decides whether a navigation may proceed. `state` and
//! `util` bridge those pieces into Leptos reactive context.

pub mod config;
pub mod error;
pub mod net;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use error::{ApiError, AuthenticationError, InvalidationReason};
pub use routes::{AppRoute, NavigationDecision, NavigationGuard, RoutePolicy};
pub use session::{Session, SessionPhase, SessionStore};

/// Browser entry point: console logging, build-time config, and a store
/// backed by `fetch` and `localStorage`.
///
/// # Errors
///
/// Returns [`error::ConfigError`] if a build-time variable is malformed.
#[cfg(feature = "hydrate")]
pub fn bootstrap() -> Result<SessionStore, error::ConfigError> {
    telemetry::init(log::Level::Debug);
    let config = ClientConfig::from_build_env()?;
    log::debug!("api base url: {}", config.api_base_url);
    Ok(SessionStore::browser(&config))
}
