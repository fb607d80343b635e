//! Authentication endpoints.

use opsdesk_core::now_ms;
use opsdesk_session::{AuthUser, TokenData};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::auth::{AuthResponse, LoginRequest};

/// Authentication endpoint group.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in with email and password.
    ///
    /// Sends `POST /auth/login`. On success the returned token lifetime
    /// (`expiresIn`, milliseconds) is converted to an absolute expiry
    /// instant and the session is persisted through the manager, which
    /// fills any defaulted fields. A 401 means the credentials were
    /// rejected; a 403 means the account is disabled.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post_json("/auth/login", &body).await?;

        let token = TokenData {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at: now_ms() + response.expires_in,
            user: response.user,
        };
        self.client.session().save_session(token)?;

        let user = self
            .client
            .session()
            .current_user()
            .ok_or_else(|| ApiError::Unexpected {
                status: 200,
                body: "login succeeded but no user record was stored".to_string(),
            })?;
        tracing::info!(email = %user.email, role = %user.role, "Logged in");
        Ok(user)
    }

    /// Clear the local session. There is no server-side logout call; the
    /// token simply stops being sent.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().logout()?;
        tracing::info!("Logged out");
        Ok(())
    }
}
