//! Incident entity, comments, attachments, DTOs, and list filter.

use serde::{Deserialize, Serialize};
use validator::Validate;

use opsdesk_core::incident::{IncidentCategory, IncidentStatus, Severity};
use opsdesk_core::{EntityId, Timestamp};

use crate::query::ListQuery;

/// An operational incident as returned by the API.
///
/// Comments and attachments ride along embedded in the payload; the
/// detail endpoints return them populated, list endpoints may leave them
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: EntityId,
    /// Server-assigned display number, e.g. `INC-0042`.
    pub number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<IncidentCategory>,
    pub severity: Severity,
    pub status: IncidentStatus,
    /// Risk assessment on the same scale as severity.
    #[serde(default)]
    pub risk_level: Option<Severity>,
    #[serde(default)]
    pub financial_impact: Option<f64>,
    #[serde(default)]
    pub affected_transactions: Option<String>,
    #[serde(default)]
    pub customer_impact_count: Option<i64>,
    #[serde(default)]
    pub compliance_flag: Option<bool>,
    #[serde(default)]
    pub involved_systems: Option<String>,
    /// When the incident occurred, as the form-entered local date-time
    /// string (no timezone).
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub detected_at: Option<Timestamp>,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(default)]
    pub resolution_details: Option<String>,
    pub department: String,
    #[serde(default)]
    pub reporter_id: Option<String>,
    #[serde(default)]
    pub reporter_name: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub comments: Vec<IncidentComment>,
    #[serde(default)]
    pub attachments: Vec<IncidentAttachment>,
}

/// A comment on an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentComment {
    pub id: EntityId,
    pub content: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Metadata for a file attached to an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentAttachment {
    pub id: EntityId,
    pub incident_id: EntityId,
    /// Stored file name on the server.
    pub file_name: String,
    /// File name as uploaded by the user.
    pub original_file_name: String,
    pub file_size: u64,
    pub content_type: String,
    pub file_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
    pub uploaded_at: Timestamp,
    pub uploaded_by: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating an incident.
///
/// The length rules mirror the server's: title 5-200 characters,
/// description 20-2000 (see [`opsdesk_core::incident`] for the canonical
/// limits). Validation runs locally before the request is sent.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncident {
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 20,
        max = 2000,
        message = "Description must be between 20 and 2000 characters"
    ))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<IncidentCategory>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_transactions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub involved_systems: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    pub department: String,
}

impl CreateIncident {
    /// A minimal payload with the required fields; optional assessment
    /// fields start unset.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        department: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: None,
            severity,
            risk_level: None,
            financial_impact: None,
            affected_transactions: None,
            customer_impact_count: None,
            compliance_flag: None,
            involved_systems: None,
            incident_date: None,
            department: department.into(),
        }
    }
}

/// Payload for a partial incident update. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncident {
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
    pub status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<IncidentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_transactions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub involved_systems: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Body for adding an incident comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub content: String,
}

/// Server-side filter fields for the incident list endpoint, in wire
/// naming. Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentFilter {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub search_term: Option<String>,
    /// Inclusive date-range bounds on the incident date, ISO formatted.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl IncidentFilter {
    /// Overlay the set fields onto a list query.
    pub fn apply(&self, mut query: ListQuery) -> ListQuery {
        let fields = [
            ("status", &self.status),
            ("severity", &self.severity),
            ("category", &self.category),
            ("department", &self.department),
            ("searchTerm", &self.search_term),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
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
