//! Request and response payloads for the HTTP API.

pub mod health;
pub mod score;
pub mod validation;
