//! Networking modules for the HR API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves raw requests, `gateway` authorizes them and watches for
//! 401s, `api` names the authentication/identity endpoints, and `types`
//! defines their wire schema.

pub mod api;
pub mod gateway;
pub mod transport;
pub mod types;

pub use gateway::RequestGateway;
pub use transport::{ApiRequest, ApiResponse, Body, Method, Transport};
