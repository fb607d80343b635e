//! Shared domain vocabulary for the opsdesk client.
//!
//! Status, severity, category, and role enums with their wire string
//! constants, the department catalog, display formatting helpers, and
//! text-field validation rules. This crate is pure: no I/O, no async,
//! no storage. Everything operates on values passed in by the caller.

pub mod change_request;
pub mod department;
pub mod error;
pub mod format;
pub mod incident;
pub mod role;
pub mod types;

pub use error::CoreError;
pub use role::Role;
pub use types::{now_ms, EntityId, EpochMillis, SortDirection, Timestamp};
