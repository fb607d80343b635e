//! Incident endpoints: CRUD, comments, attachments.

use validator::Validate;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::incident::{
    CreateComment, CreateIncident, Incident, IncidentAttachment, UpdateIncident,
};
use crate::models::page::Page;
use crate::query::ListQuery;

/// Incident endpoint group.
pub struct IncidentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> IncidentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of incidents. Sends `GET /incidents` with the
    /// query's pagination, sort, and filter pairs.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Incident>, ApiError> {
        self.client
            .get_json_query("/incidents", &query.to_query_pairs())
            .await
    }

    /// Fetch a single incident with its comments and attachments.
    pub async fn get(&self, id: &str) -> Result<Incident, ApiError> {
        self.client.get_json(&format!("/incidents/{id}")).await
    }

    /// Create an incident. The payload is validated locally first;
    /// rule violations surface as [`ApiError::Validation`] without a
    /// request being sent.
    pub async fn create(&self, payload: &CreateIncident) -> Result<Incident, ApiError> {
        payload.validate()?;
        self.client.post_json("/incidents", payload).await
    }

    /// Partially update an incident. Only the fields present in the
    /// payload are sent or validated.
    pub async fn update(&self, id: &str, payload: &UpdateIncident) -> Result<Incident, ApiError> {
        payload.validate()?;
        self.client
            .put_json(&format!("/incidents/{id}"), payload)
            .await
    }

    /// Delete an incident.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/incidents/{id}")).await
    }

    /// Add a comment to an incident. Returns the updated incident so the
    /// caller can refresh its detail view in one round trip.
    pub async fn add_comment(&self, id: &str, content: &str) -> Result<Incident, ApiError> {
        let body = CreateComment {
            content: content.to_string(),
        };
        self.client
            .post_json(&format!("/incidents/{id}/comments"), &body)
            .await
    }

    /// Upload a file attachment via `POST /incidents/{id}/attachments`
    /// (multipart: `file` part plus an optional `description` text part).
    pub async fn upload_attachment(
        &self,
        incident_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        description: Option<&str>,
    ) -> Result<IncidentAttachment, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(description) = description {
            form = form.text("description", description.to_string());
        }

        self.client
            .post_multipart(&format!("/incidents/{incident_id}/attachments"), form)
            .await
    }

    /// Download an attachment's raw bytes.
    pub async fn download_attachment(&self, attachment_id: &str) -> Result<Vec<u8>, ApiError> {
        self.client
            .get_bytes(&format!("/attachments/{attachment_id}/download"))
            .await
    }

    /// Delete an attachment.
    pub async fn delete_attachment(&self, attachment_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/attachments/{attachment_id}"))
            .await
    }
}
