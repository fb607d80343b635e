//! The HTTP transport: URL joining, auth header attachment, response
//! classification.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use opsdesk_session::SessionManager;

use crate::config::ApiConfig;
use crate::endpoints::{AuthApi, ChangeRequestsApi, IncidentsApi, UsersApi};
use crate::error::ApiError;

/// HTTP client for the opsdesk REST API.
///
/// Owns a pooled [`reqwest::Client`], the API configuration, and a shared
/// [`SessionManager`]. Whenever the stored session is valid, outgoing
/// requests carry `Authorization: <tokenType> <accessToken>`; otherwise
/// they go out bare and the server decides what they may do.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Build a client over the given configuration and session manager.
    pub fn new(config: ApiConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// The session manager shared with this client.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ---- endpoint groups ----

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn incidents(&self) -> IncidentsApi<'_> {
        IncidentsApi::new(self)
    }

    pub fn change_requests(&self) -> ChangeRequestsApi<'_> {
        ChangeRequestsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    // ---- transport helpers ----

    /// Join an endpoint path (with leading slash) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Start a request, attaching the auth header when a valid session
    /// exists.
    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(header) = self.session.auth_header() {
            builder = builder.header(AUTHORIZATION, header);
        } else {
            tracing::debug!(path, "No valid session; sending request without auth header");
        }
        builder
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    /// `GET` a JSON resource with query pairs.
    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST` a JSON body, parsing a JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT` a JSON body, parsing a JSON response.
    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE` a resource, discarding the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::check_status(response).await
    }

    /// `POST` a multipart form, parsing a JSON response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET` a binary resource as raw bytes.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or the classified [`ApiError`] on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), "Request failed");
            return Err(ApiError::from_status(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
