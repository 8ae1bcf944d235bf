//! Route table, per-route policy, and the navigation guard.

pub mod guard;
pub mod policy;

pub use guard::{NavigationDecision, NavigationGuard, evaluate};
pub use policy::{AppRoute, RoutePolicy, policy_for_path};
