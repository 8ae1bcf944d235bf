//! Test doubles shared by unit tests across modules.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::transport::{ApiRequest, ApiResponse, Transport};
use crate::net::types::{Role, User};
use crate::session::storage::MemoryStorage;
use crate::session::store::SessionStore;

// =============================================================================
// ScriptedTransport
// =============================================================================

/// Transport replaying scripted outcomes in order and recording every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(ApiResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, err: ApiError) {
        self.outcomes.borrow_mut().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn requests_to(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_owned())))
    }
}

// =============================================================================
// fixtures
// =============================================================================

pub(crate) fn sample_user(id: i64, role: Role) -> User {
    User {
        id,
        email: format!("user{id}@corp.test"),
        name: format!("User {id}"),
        hire_date: Some("2022-01-03".to_owned()),
        is_active: true,
        role,
    }
}

pub(crate) fn user_json(id: i64, role: &str) -> String {
    format!(r#"{{"id":{id},"email":"user{id}@corp.test","name":"User {id}","role":"{role}"}}"#)
}

pub(crate) fn token_json(token: &str) -> String {
    format!(r#"{{"access_token":"{token}","token_type":"bearer"}}"#)
}

/// Store over a scripted transport and in-memory slot with default config.
pub(crate) fn store_with(transport: &Rc<ScriptedTransport>, storage: &Rc<MemoryStorage>) -> SessionStore {
    SessionStore::new(transport.clone(), storage.clone(), &ClientConfig::default())
}
