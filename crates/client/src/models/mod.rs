//! Wire models for the opsdesk API.
//!
//! Entity shapes, create/update DTOs, list filters, and the paged
//! response envelope. Everything serializes with camelCase field names
//! to match the server's JSON.

pub mod auth;
pub mod change_request;
pub mod incident;
pub mod page;
pub mod user;
