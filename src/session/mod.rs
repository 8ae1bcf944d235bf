//! Client session: identity, bearer credential, and their persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state` is the plain value type, `storage` the persistent slot, `cell` the
//! shared mutable session, and `store` the login/hydration/logout operations
//! the rest of the client calls.

pub mod cell;
pub mod state;
pub mod storage;
pub mod store;

pub use cell::SubscriptionId;
pub use state::{Session, SessionPhase};
pub use storage::{CredentialStorage, MemoryStorage};
pub use store::SessionStore;
