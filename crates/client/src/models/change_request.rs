//! Change request entity, DTOs, and list filter.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::change_request::ChangeRequestStatus;
use opsdesk_core::{EntityId, Timestamp};

use crate::query::ListQuery;

/// A change request raised against an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub id: EntityId,
    /// Server-assigned display number, e.g. `CR-0017`.
    pub number: String,
    pub title: String,
    pub description: String,
    pub status: ChangeRequestStatus,
    /// The incident this change addresses.
    pub incident_id: EntityId,
    pub assigned_department: String,
    pub created_by: String,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub completed_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub approved_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for raising a change request. Same title and description
/// length rules as incidents.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChangeRequest {
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 20,
        max = 2000,
        message = "Description must be between 20 and 2000 characters"
    ))]
    pub description: String,
    pub incident_id: EntityId,
    pub assigned_department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateChangeRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        incident_id: impl Into<EntityId>,
        assigned_department: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            incident_id: incident_id.into(),
            assigned_department: assigned_department.into(),
            notes: None,
        }
    }
}

/// Payload for a partial change request update. Workflow actions
/// (approve, reject, complete) are expressed as status updates through
/// this type; the server stamps the acting user and timestamp.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChangeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 20,
        max = 2000,
        message = "Description must be between 20 and 2000 characters"
    ))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChangeRequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateChangeRequest {
    /// An update that only moves the status, optionally with notes.
    pub fn status_change(status: ChangeRequestStatus, notes: Option<String>) -> Self {
        Self {
            status: Some(status),
            notes,
            ..Default::default()
        }
    }
}

/// Server-side filter fields for the change request list endpoint, in
/// wire naming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRequestFilter {
    pub status: Option<String>,
    pub assigned_department: Option<String>,
    pub incident_id: Option<String>,
    pub created_by: Option<String>,
    pub search_term: Option<String>,
}

impl ChangeRequestFilter {
    /// Overlay the set fields onto a list query.
    pub fn apply(&self, mut query: ListQuery) -> ListQuery {
        let fields = [
            ("status", &self.status),
            ("assignedDepartment", &self.assigned_department),
            ("incidentId", &self.incident_id),
            ("createdBy", &self.created_by),
            ("searchTerm", &self.search_term),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                query = query.with_filter(name, value.clone());
            }
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
