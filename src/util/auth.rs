//! Shared route-guard helper for page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page applies the same policy enforcement: run the navigation
//! guard once on entry (hydrating the session if needed), then keep watching
//! the session so a server-side invalidation mid-visit also redirects.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::{RoutePolicy, evaluate};
use crate::state::auth::{AuthContext, AuthState};

/// Redirect away from the current page whenever `policy` rejects the session.
pub fn install_route_guard<F>(auth: AuthContext, policy: RoutePolicy, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let guard = crate::routes::NavigationGuard::new(auth.store());
        let navigate_on_entry = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Some(path) = guard.check(policy).await.redirect_path() {
                navigate_on_entry(path, NavigateOptions::default());
            }
        });
    }

    Effect::new(move || {
        let state = auth.state.get();
        if let Some(path) = settled_redirect(&state, policy) {
            navigate(path, NavigateOptions::default());
        }
    });
}

/// Redirect target for a settled (not loading) session, if any.
fn settled_redirect(state: &AuthState, policy: RoutePolicy) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    evaluate(policy, &state.session).redirect_path()
}
