//! Persisted session shapes: the authenticated user and the token blob.
//!
//! Both structures serialize with camelCase field names, matching what the
//! authentication endpoint returns and what earlier client versions wrote
//! to storage. Older blobs without the legacy `isSupervisor` flag or with
//! a missing expiry still deserialize; [`TokenData::normalize`] fills the
//! gaps when a session is saved.

use serde::{Deserialize, Serialize};

use opsdesk_core::{EpochMillis, Role, Timestamp};

/// Token type used when the server omits one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Expiry window applied when the server omits one: one hour.
pub const DEFAULT_EXPIRY_MS: EpochMillis = 3_600_000;

/// The authenticated user as returned by the login endpoint and cached
/// locally alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Parsed through [`Role`]'s single normalization point; an unknown
    /// role string makes the whole record fail to deserialize.
    pub role: Role,
    pub primary_department: String,
    #[serde(default)]
    pub additional_departments: Vec<String>,
    pub active: bool,
    /// Legacy supervisor flag. Older server builds sent this boolean
    /// alongside the role enum; both signals still grant supervisor
    /// privileges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_supervisor: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl AuthUser {
    /// Whether this user carries supervisor privileges, honoring both the
    /// role enum and the legacy boolean flag.
    pub fn grants_supervisor(&self) -> bool {
        self.role.grants_supervisor() || self.is_supervisor == Some(true)
    }

    /// Whether this user carries administrative privileges.
    pub fn grants_admin(&self) -> bool {
        self.role.grants_admin()
    }
}

/// The session blob persisted under the `auth_token` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Absolute expiry instant in epoch milliseconds. Zero or negative
    /// means "not set" and is filled in by [`normalize`](Self::normalize).
    #[serde(default)]
    pub expires_at: EpochMillis,
    pub user: AuthUser,
}

impl TokenData {
    /// Fill defaulted fields before the blob is persisted: an empty token
    /// type becomes `Bearer`, a missing expiry becomes `now` plus one hour.
    pub fn normalize(&mut self, now: EpochMillis) {
        if self.token_type.trim().is_empty() {
            self.token_type = DEFAULT_TOKEN_TYPE.to_string();
        }
        if self.expires_at <= 0 {
            self.expires_at = now + DEFAULT_EXPIRY_MS;
        }
    }

    /// Whether the token is usable at the given instant. Requires a
    /// non-empty access token and token type, a positive expiry, and
    /// `now` strictly before the expiry -- a token at exactly its expiry
    /// instant is already invalid.
    pub fn is_valid_at(&self, now: EpochMillis) -> bool {
        if self.access_token.trim().is_empty() || self.token_type.trim().is_empty() {
            return false;
        }
        if self.expires_at <= 0 {
            return false;
        }
        now < self.expires_at
    }

    /// The `Authorization` header value: `"<tokenType> <accessToken>"`.
    pub fn auth_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Milliseconds until expiry; negative once expired.
    pub fn remaining_ms(&self, now: EpochMillis) -> i64 {
        self.expires_at - now
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
