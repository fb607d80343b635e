//! Change request endpoints: CRUD plus the approval workflow.

use validator::Validate;

use opsdesk_core::change_request::ChangeRequestStatus;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::change_request::{ChangeRequest, CreateChangeRequest, UpdateChangeRequest};
use crate::models::page::Page;
use crate::query::ListQuery;

/// Change request endpoint group.
pub struct ChangeRequestsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChangeRequestsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of change requests.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<ChangeRequest>, ApiError> {
        self.client
            .get_json_query("/change-requests", &query.to_query_pairs())
            .await
    }

    /// Fetch a single change request.
    pub async fn get(&self, id: &str) -> Result<ChangeRequest, ApiError> {
        self.client.get_json(&format!("/change-requests/{id}")).await
    }

    /// Raise a change request. The payload is validated locally first.
    pub async fn create(&self, payload: &CreateChangeRequest) -> Result<ChangeRequest, ApiError> {
        payload.validate()?;
        self.client.post_json("/change-requests", payload).await
    }

    /// Partially update a change request. Only present fields are sent
    /// or validated.
    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateChangeRequest,
    ) -> Result<ChangeRequest, ApiError> {
        payload.validate()?;
        self.client
            .put_json(&format!("/change-requests/{id}"), payload)
            .await
    }

    /// Delete a change request.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/change-requests/{id}")).await
    }

    // ---- workflow actions ----
    //
    // All three are partial updates carrying the target status; the server
    // enforces the transition rules and stamps the acting user and
    // timestamp. A 403 means the current user lacks supervisor rights.

    /// Approve a pending change request.
    pub async fn approve(
        &self,
        id: &str,
        notes: Option<String>,
    ) -> Result<ChangeRequest, ApiError> {
        self.set_status(id, ChangeRequestStatus::Approved, notes).await
    }

    /// Reject a pending change request.
    pub async fn reject(&self, id: &str, notes: Option<String>) -> Result<ChangeRequest, ApiError> {
        self.set_status(id, ChangeRequestStatus::Rejected, notes).await
    }

    /// Mark an approved change request completed.
    pub async fn complete(
        &self,
        id: &str,
        notes: Option<String>,
    ) -> Result<ChangeRequest, ApiError> {
        self.set_status(id, ChangeRequestStatus::Completed, notes).await
    }

    async fn set_status(
        &self,
        id: &str,
        status: ChangeRequestStatus,
        notes: Option<String>,
    ) -> Result<ChangeRequest, ApiError> {
        tracing::debug!(id, status = %status, "Updating change request status");
        self.update(id, &UpdateChangeRequest::status_change(status, notes))
            .await
    }
}
