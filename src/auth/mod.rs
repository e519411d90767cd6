//! Session-token collaborator.
//!
//! Token issuance (login/registration) lives upstream of this service;
//! here we only validate the session token a request carries and yield
//! the owning user id for record scoping.

pub mod jwt;
pub mod middleware;
pub mod model;

#[cfg(test)]
mod tests;

pub use jwt::{generate_session_token, validate_token};
pub use middleware::validate_request_token;
pub use model::Claims;
