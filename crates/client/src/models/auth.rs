//! Authentication wire shapes.

use serde::{Deserialize, Serialize};

use opsdesk_session::AuthUser;

/// Body of the login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Token lifetime in milliseconds. The client turns this into an
    /// absolute expiry instant before persisting the session.
    pub expires_in: i64,
    pub user: AuthUser,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
