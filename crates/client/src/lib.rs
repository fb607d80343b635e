//! Typed REST client for the opsdesk API.
//!
//! Wraps the remote incident/change-request/user endpoints using
//! [`reqwest`]. The client owns a base URL, a pooled HTTP client, and a
//! shared [`SessionManager`](opsdesk_session::SessionManager); every
//! request goes out with an `Authorization` header whenever a valid
//! session exists, and bare otherwise.
//!
//! Endpoint groups live in [`endpoints`]: authentication, incidents
//! (CRUD, comments, attachments), change requests (CRUD plus the
//! approve/reject/complete workflow), and users (CRUD plus the
//! activate toggle). All failures map onto the [`ApiError`] taxonomy;
//! nothing here retries.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod query;

pub use config::ApiConfig;
pub use error::ApiError;
pub use http::ApiClient;
pub use models::page::Page;
pub use query::{ListQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
