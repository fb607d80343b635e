//! Token/session management for the opsdesk client.
//!
//! Owns the persisted credentials (access token, token type, expiry, and
//! the authenticated user record) and derives the authorization predicates
//! the rest of the client asks about: `is_authenticated`, `is_admin`,
//! `is_supervisor`. Validity is a pure function of stored state and the
//! wall clock; nothing here runs timers or talks to the network.
//!
//! The manager is constructed once at startup with its storage handle and
//! passed explicitly (usually behind an `Arc`) to whoever needs it. There
//! is no global session singleton.

pub mod error;
pub mod manager;
pub mod token;

pub use error::SessionError;
pub use manager::{SessionManager, SessionSummary};
pub use token::{AuthUser, TokenData};
