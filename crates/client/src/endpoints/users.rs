//! User management endpoints.

use validator::Validate;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::page::Page;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::query::ListQuery;

/// User endpoint group. All of these require the admin role; the server
/// answers 403 otherwise.
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of users.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.client
            .get_json_query("/users", &query.to_query_pairs())
            .await
    }

    /// Fetch a single user.
    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.client.get_json(&format!("/users/{id}")).await
    }

    /// Create a user account. The payload is validated locally first.
    pub async fn create(&self, payload: &CreateUser) -> Result<User, ApiError> {
        payload.validate()?;
        self.client.post_json("/users", payload).await
    }

    /// Partially update a user. Only present fields are sent or
    /// validated.
    pub async fn update(&self, id: &str, payload: &UpdateUser) -> Result<User, ApiError> {
        payload.validate()?;
        self.client.put_json(&format!("/users/{id}"), payload).await
    }

    /// Delete a user account.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/{id}")).await
    }

    /// Activate or deactivate an account without touching its other
    /// fields.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<User, ApiError> {
        tracing::debug!(id, active, "Toggling user active flag");
        let payload = UpdateUser {
            active: Some(active),
            ..Default::default()
        };
        self.update(id, &payload).await
    }
}
