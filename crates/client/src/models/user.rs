//! Managed user entity, DTOs, and list filter.
//!
//! This is the admin-facing user record. The authenticated user's own
//! record (with the legacy supervisor flag) lives in
//! [`opsdesk_session::AuthUser`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::{EntityId, Role, Timestamp};

use crate::query::ListQuery;

/// A user account as managed through the admin screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub primary_department: String,
    #[serde(default)]
    pub additional_departments: Vec<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a user account.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub primary_department: String,
    #[serde(default)]
    pub additional_departments: Vec<String>,
    pub role: Role,
}

impl CreateUser {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        primary_department: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            primary_department: primary_department.into(),
            additional_departments: Vec::new(),
            role,
        }
    }
}

/// Payload for a partial user update. Email is immutable after creation.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_departments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Server-side filter fields for the user list endpoint, in wire naming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<String>,
    pub primary_department: Option<String>,
    /// Sent as the string `"true"` / `"false"`.
    pub active: Option<bool>,
    pub search_term: Option<String>,
}

impl UserFilter {
    /// Overlay the set fields onto a list query.
    pub fn apply(&self, mut query: ListQuery) -> ListQuery {
        if let Some(role) = &self.role {
            query = query.with_filter("role", role.clone());
        }
        if let Some(department) = &self.primary_department {
            query = query.with_filter("primaryDepartment", department.clone());
        }
        if let Some(active) = self.active {
            query = query.with_filter("active", active.to_string());
        }
        if let Some(term) = &self.search_term {
            query = query.with_filter("searchTerm", term.clone());
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
