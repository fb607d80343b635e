//! The session manager: persistence, validity checks, role predicates.

use std::sync::{Arc, RwLock};

use opsdesk_core::format::{format_remaining, mask_token};
use opsdesk_core::{now_ms, EpochMillis};
use opsdesk_store::{json, keys, KvStore};

use crate::error::SessionError;
use crate::token::{AuthUser, TokenData};

/// Owns the persisted session and an in-memory reference to the current
/// user. Constructed once at startup; share it behind an `Arc`.
///
/// Every authorization check re-reads the stored token and compares its
/// expiry against the wall clock -- no background timer invalidates a
/// session, it simply stops passing checks.
pub struct SessionManager {
    store: Arc<dyn KvStore>,
    current_user: RwLock<Option<AuthUser>>,
}

/// Diagnostics snapshot of the session state, with the token masked for
/// display.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub authenticated: bool,
    pub admin: bool,
    pub supervisor: bool,
    pub token_valid: bool,
    /// First six and last four characters of the access token.
    pub masked_token: Option<String>,
    pub expires_at: Option<EpochMillis>,
    /// Human-readable time to expiry ("Expired", "N minute(s) remaining").
    pub remaining: Option<String>,
    pub user_email: Option<String>,
}

impl SessionManager {
    /// Create a manager over the given store, restoring the cached user
    /// record into memory if one is present.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        let cached: Option<AuthUser> = match json::get_json(store.as_ref(), keys::AUTH_USER) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read cached user record");
                None
            }
        };

        if let Some(user) = &cached {
            tracing::debug!(email = %user.email, role = %user.role, "Restored cached session user");
        }

        Self {
            store,
            current_user: RwLock::new(cached),
        }
    }

    /// Persist a session: normalizes defaulted fields, then replaces the
    /// stored token blob and cached user record (clear-then-write), and
    /// updates the in-memory reference.
    pub fn save_session(&self, mut token: TokenData) -> Result<(), SessionError> {
        token.normalize(now_ms());

        tracing::debug!(
            token_type = %token.token_type,
            expires_at = token.expires_at,
            role = %token.user.role,
            "Saving session"
        );

        self.store.delete(keys::AUTH_TOKEN)?;
        json::set_json(self.store.as_ref(), keys::AUTH_TOKEN, &token)?;

        self.store.delete(keys::AUTH_USER)?;
        json::set_json(self.store.as_ref(), keys::AUTH_USER, &token.user)?;

        let mut current = self.current_user.write().unwrap();
        *current = Some(token.user);
        Ok(())
    }

    /// The persisted session, or `None` when absent. A malformed stored
    /// blob also reads as `None`; only storage I/O failures are errors.
    pub fn load_session(&self) -> Result<Option<TokenData>, SessionError> {
        Ok(json::get_json(self.store.as_ref(), keys::AUTH_TOKEN)?)
    }

    /// Whether a stored, complete, unexpired token exists right now.
    pub fn is_valid(&self) -> bool {
        match self.load_session() {
            Ok(Some(token)) => token.is_valid_at(now_ms()),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Treating unreadable session as invalid");
                false
            }
        }
    }

    /// Whether a current user is loaded and the stored token is valid.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().unwrap().is_some() && self.is_valid()
    }

    /// The in-memory user reference, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current_user.read().unwrap().clone()
    }

    /// Whether the current user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.current_user()
            .map(|user| user.grants_admin())
            .unwrap_or(false)
    }

    /// Whether the current user holds supervisor privileges, via the role
    /// enum or the legacy boolean flag.
    pub fn is_supervisor(&self) -> bool {
        self.current_user()
            .map(|user| user.grants_supervisor())
            .unwrap_or(false)
    }

    /// Clear the persisted session and the in-memory reference.
    /// Safe to call when already logged out.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.delete(keys::AUTH_TOKEN)?;
        self.store.delete(keys::AUTH_USER)?;
        let mut current = self.current_user.write().unwrap();
        if current.take().is_some() {
            tracing::debug!("Session cleared");
        }
        Ok(())
    }

    /// The `Authorization` header value for outgoing requests, or `None`
    /// when there is no valid session. Requests without a session go out
    /// bare; the server decides what they may do.
    pub fn auth_header(&self) -> Option<String> {
        match self.load_session() {
            Ok(Some(token)) if token.is_valid_at(now_ms()) => Some(token.auth_header()),
            _ => None,
        }
    }

    /// Diagnostics snapshot for debug surfaces.
    pub fn summary(&self) -> SessionSummary {
        let now = now_ms();
        let token = self.load_session().unwrap_or_default();
        let token_valid = token
            .as_ref()
            .map(|t| t.is_valid_at(now))
            .unwrap_or(false);

        SessionSummary {
            authenticated: self.is_authenticated(),
            admin: self.is_admin(),
            supervisor: self.is_supervisor(),
            token_valid,
            masked_token: token.as_ref().map(|t| mask_token(&t.access_token)),
            expires_at: token.as_ref().map(|t| t.expires_at),
            remaining: token.as_ref().map(|t| format_remaining(t.remaining_ms(now))),
            user_email: self.current_user().map(|u| u.email),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
