use super::*;
use crate::net::types::Role;

fn user(role: Role) -> User {
    User {
        id: 1,
        email: "a@x.com".to_owned(),
        name: "A".to_owned(),
        hire_date: None,
        is_active: true,
        role,
    }
}

fn session(user: Option<User>, credential: Option<&str>) -> Session {
    Session { user, credential: credential.map(str::to_owned) }
}

#[test]
fn default_session_is_anonymous() {
    let s = Session::default();
    assert_eq!(s.phase(), SessionPhase::Anonymous);
    assert!(!s.is_authenticated());
    assert!(!s.is_admin());
}

#[test]
fn credential_without_user_is_pending() {
    let s = session(None, Some("tok"));
    assert_eq!(s.phase(), SessionPhase::Pending);
    assert!(!s.is_authenticated());
}

#[test]
fn credential_and_user_is_authenticated() {
    let s = session(Some(user(Role::User)), Some("tok"));
    assert_eq!(s.phase(), SessionPhase::Authenticated);
    assert!(s.is_authenticated());
    assert!(!s.is_admin());
}

#[test]
fn user_without_credential_is_not_authenticated() {
    let s = session(Some(user(Role::Admin)), None);
    assert_eq!(s.phase(), SessionPhase::Anonymous);
    assert!(!s.is_authenticated());
    assert!(s.is_admin());
}

#[test]
fn is_authenticated_matches_field_presence_for_all_combinations() {
    for has_user in [false, true] {
        for has_credential in [false, true] {
            let s = session(has_user.then(|| user(Role::User)), has_credential.then_some("tok"));
            assert_eq!(s.is_authenticated(), has_user && has_credential);
        }
    }
}
