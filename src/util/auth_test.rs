use super::*;
use crate::net::types::Role;
use crate::session::Session;
use crate::test_support::sample_user;

fn state(role: Option<Role>, credential: bool, loading: bool) -> AuthState {
    AuthState {
        session: Session { user: role.map(|r| sample_user(1, r)), credential: credential.then(|| "tok".to_owned()) },
        loading,
    }
}

#[test]
fn settled_redirect_sends_anonymous_to_login() {
    assert_eq!(settled_redirect(&state(None, false, false), RoutePolicy::AUTHENTICATED), Some("/login"));
}

#[test]
fn settled_redirect_waits_while_loading() {
    assert_eq!(settled_redirect(&state(None, true, true), RoutePolicy::AUTHENTICATED), None);
}

#[test]
fn settled_redirect_allows_authorized_session() {
    assert_eq!(settled_redirect(&state(Some(Role::Admin), true, false), RoutePolicy::ADMIN), None);
}

#[test]
fn settled_redirect_sends_non_admin_to_dashboard() {
    assert_eq!(settled_redirect(&state(Some(Role::User), true, false), RoutePolicy::ADMIN), Some("/"));
}

#[test]
fn settled_redirect_sends_signed_in_user_off_login() {
    assert_eq!(settled_redirect(&state(Some(Role::User), true, false), RoutePolicy::GUEST), Some("/"));
}
