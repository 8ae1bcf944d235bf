use super::*;

#[test]
fn user_decodes_full_identity_record() {
    let user: User = serde_json::from_str(
        r#"{"id":7,"email":"kim@corp.test","name":"Kim","hire_date":"2021-03-02","is_active":true,"role":"admin"}"#,
    )
    .unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "kim@corp.test");
    assert_eq!(user.hire_date.as_deref(), Some("2021-03-02"));
    assert!(user.is_admin());
}

#[test]
fn user_decodes_minimal_record_with_defaults() {
    let user: User = serde_json::from_str(r#"{"id":1,"role":"user"}"#).unwrap();
    assert_eq!(user.id, 1);
    assert!(user.email.is_empty());
    assert!(user.is_active);
    assert!(!user.is_admin());
}

#[test]
fn user_rejects_unknown_role() {
    let result = serde_json::from_str::<User>(r#"{"id":1,"role":"superuser"}"#);
    assert!(result.is_err());
}

#[test]
fn user_requires_role() {
    assert!(serde_json::from_str::<User>(r#"{"id":1}"#).is_err());
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
}

#[test]
fn token_response_defaults_token_type() {
    let token: TokenResponse = serde_json::from_str(r#"{"access_token":"tok-123"}"#).unwrap();
    assert_eq!(token.access_token, "tok-123");
    assert_eq!(token.token_type, "bearer");
}
