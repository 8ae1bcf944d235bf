//! Authentication and identity endpoint calls.
//!
//! Both go through the [`RequestGateway`], so the identity call carries the
//! bearer credential and a 401 from either endpoint invalidates the session
//! like any other call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::RequestGateway;
use super::types::{TokenResponse, User};
use crate::error::ApiError;

pub const TOKEN_ENDPOINT: &str = "/auth/token";
pub const IDENTITY_ENDPOINT: &str = "/users/me";

/// Exchange a username/password pair for a bearer token at `POST /auth/token`.
///
/// The identifier is sent as the `username` form field.
///
/// # Errors
///
/// Returns [`ApiError::Http`] when the server rejects the credentials,
/// [`ApiError::Decode`] for an unexpected body, or a transport error.
pub async fn exchange_credentials(gateway: &RequestGateway, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
    gateway.post_form_json(TOKEN_ENDPOINT, &login_form(username, password)).await
}

/// Fetch the identity behind the held credential from `GET /users/me`.
///
/// # Errors
///
/// Returns whatever the gateway returns; callers treat every failure as
/// "not currently authenticated".
pub async fn fetch_current_user(gateway: &RequestGateway) -> Result<User, ApiError> {
    gateway.get_json(IDENTITY_ENDPOINT).await
}

fn login_form<'a>(username: &'a str, password: &'a str) -> [(&'static str, &'a str); 2] {
    [("username", username), ("password", password)]
}
