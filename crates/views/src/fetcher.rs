//! The paged fetch seam between list controllers and the API client.

use std::sync::Arc;

use async_trait::async_trait;

use opsdesk_client::models::change_request::ChangeRequest;
use opsdesk_client::models::incident::Incident;
use opsdesk_client::models::user::User;
use opsdesk_client::{ApiClient, ApiError, ListQuery, Page};

/// Issues one paged list request.
///
/// Controllers go through this trait rather than the client directly so
/// tests can script responses, including out-of-order and failing ones,
/// without a server.
#[async_trait]
pub trait PageFetcher<E>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<E>, ApiError>;
}

/// Fetches incident pages through `GET /incidents`.
pub struct IncidentFetcher {
    client: Arc<ApiClient>,
}

impl IncidentFetcher {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<Incident> for IncidentFetcher {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Incident>, ApiError> {
        self.client.incidents().list(query).await
    }
}

/// Fetches change request pages through `GET /change-requests`.
pub struct ChangeRequestFetcher {
    client: Arc<ApiClient>,
}

impl ChangeRequestFetcher {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<ChangeRequest> for ChangeRequestFetcher {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<ChangeRequest>, ApiError> {
        self.client.change_requests().list(query).await
    }
}

/// Fetches user pages through `GET /users`.
pub struct UserFetcher {
    client: Arc<ApiClient>,
}

impl UserFetcher {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher<User> for UserFetcher {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.client.users().list(query).await
    }
}
