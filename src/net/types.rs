//! Wire DTOs for the authentication and identity endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authorization level of an HR portal account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The current identity as returned by `/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric account identifier.
    pub id: i64,
    /// Login email address.
    #[serde(default)]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Hire date as an ISO 8601 date string, if recorded.
    #[serde(default)]
    pub hire_date: Option<String>,
    /// Whether the account is enabled.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Authorization level.
    pub role: Role,
}

fn default_is_active() -> bool {
    true
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Successful response of the `/auth/token` credential exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer credential.
    pub access_token: String,
    /// Token scheme reported by the server (normally `"bearer"`).
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}
