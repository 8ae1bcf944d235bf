//! Request gateway wrapping every outbound API call.
//!
//! ARCHITECTURE
//! ============
//! Two inspection points around the transport:
//! - outgoing: attach `Authorization: Bearer <credential>` while the session
//!   holds a credential, otherwise send the request untouched;
//! - incoming: a 401 is a server-declared session invalidation. The session
//!   is reset to anonymous when the request carried the held credential,
//!   whether attached here or by the caller, and the original failure is
//!   still returned.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried here. Transport failures and non-2xx statuses are
//! returned to the call site unchanged; user-facing reporting is the caller's
//! job.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::transport::{AUTHORIZATION, ApiRequest, ApiResponse, Body, Transport};
use crate::error::{ApiError, InvalidationReason};
use crate::session::cell::SessionCell;

/// Authorizing wrapper around a [`Transport`].
#[derive(Clone)]
pub struct RequestGateway {
    transport: Rc<dyn Transport>,
    session: SessionCell,
}

impl RequestGateway {
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>, session: SessionCell) -> Self {
        Self { transport, session }
    }

    /// Send a request and return the 2xx response.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or [`ApiError::Http`] for any
    /// non-success status (401 included, after the session was invalidated).
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (request, attached) = self.authorize(request);
        let response = self.transport.send(request).await?;

        if response.status == 401 {
            self.on_unauthorized(attached.as_deref());
        }
        if !response.ok() {
            return Err(ApiError::from_status(response.status, &response.body));
        }
        Ok(response)
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::send`]; decode failures map to [`ApiError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// `POST` form fields and decode a JSON response.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::send`]; decode failures map to [`ApiError::Decode`].
    pub async fn post_form_json<T: DeserializeOwned>(&self, path: &str, fields: &[(&str, &str)]) -> Result<T, ApiError> {
        let form = fields.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        self.send(ApiRequest::post(path, Body::Form(form))).await?.json()
    }

    /// `POST` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the body cannot be serialized, otherwise
    /// see [`RequestGateway::send`].
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.send(ApiRequest::post(path, Body::Json(payload))).await?.json()
    }

    /// Attach the bearer header unless the caller already set one.
    ///
    /// Returns the bearer credential the request carries, attached here or
    /// supplied by the caller, so a later 401 can be matched against the
    /// session that produced it.
    fn authorize(&self, request: ApiRequest) -> (ApiRequest, Option<String>) {
        if let Some(header) = request.header(AUTHORIZATION) {
            let supplied = header.strip_prefix("Bearer ").map(|token| token.trim().to_owned());
            return (request, supplied);
        }
        match self.session.credential() {
            Some(credential) => {
                let request = request.with_header(AUTHORIZATION, &format!("Bearer {credential}"));
                (request, Some(credential))
            }
            None => (request, None),
        }
    }

    fn on_unauthorized(&self, attached: Option<&str>) {
        if attached.is_none() {
            log::debug!("401 on unauthenticated request; session untouched");
            return;
        }
        if self.session.invalidate_if_current(attached, InvalidationReason::Unauthorized) {
            log::warn!("401 unauthorized: credential cleared, session reset to anonymous");
        } else {
            log::debug!("401 for superseded credential ignored");
        }
    }
}
