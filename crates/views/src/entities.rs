//! Entity bindings for the generic list controller.
//!
//! [`ListEntity`] ties an entity type to its view name, tab table, and
//! a client-side filter backstop. Server-side filtering stays
//! authoritative; the backstop only hides rows that plainly contradict
//! the active criteria, and accepts any field it cannot judge locally
//! (date bounds, for one).

use std::collections::BTreeSet;

use opsdesk_client::models::change_request::ChangeRequest;
use opsdesk_client::models::incident::Incident;
use opsdesk_client::models::user::User;

use crate::tabs::{self, Tab};

/// What the list controller needs to know about an entity kind.
pub trait ListEntity: Clone + Send + Sync + 'static {
    /// Name of the view, used in the preferences storage key.
    const VIEW: &'static str;

    /// The fixed tab table for this view.
    fn tabs() -> &'static [Tab];

    /// Check one filter pair against this entity. Returns `true` for
    /// fields that cannot be judged locally.
    fn matches_filter(&self, field: &str, value: &str) -> bool;
}

/// Case-insensitive substring match over a set of text fields.
fn text_matches(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    haystacks.iter().any(|hay| hay.to_lowercase().contains(&needle))
}

impl ListEntity for Incident {
    const VIEW: &'static str = "incidents";

    fn tabs() -> &'static [Tab] {
        tabs::INCIDENT_TABS
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "status" => self.status.as_str().eq_ignore_ascii_case(value),
            "severity" => self.severity.as_str().eq_ignore_ascii_case(value),
            "category" => self
                .category
                .is_some_and(|category| category.as_str().eq_ignore_ascii_case(value)),
            "department" => self.department == value,
            "searchTerm" => text_matches(value, &[&self.number, &self.title, &self.description]),
            _ => true,
        }
    }
}

impl ListEntity for ChangeRequest {
    const VIEW: &'static str = "change_requests";

    fn tabs() -> &'static [Tab] {
        tabs::CHANGE_REQUEST_TABS
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            "status" => self.status.as_str().eq_ignore_ascii_case(value),
            "assignedDepartment" => self.assigned_department == value,
            "incidentId" => self.incident_id == value,
            "createdBy" => self.created_by == value,
            "searchTerm" => text_matches(value, &[&self.number, &self.title, &self.description]),
            _ => true,
        }
    }
}

impl ListEntity for User {
    const VIEW: &'static str = "users";

    fn tabs() -> &'static [Tab] {
        tabs::USER_TABS
    }

    fn matches_filter(&self, field: &str, value: &str) -> bool {
        match field {
            // The active flag travels as a string query value.
            "active" => match value {
                "true" => self.active,
                "false" => !self.active,
                _ => true,
            },
            "role" => self.role.as_str().eq_ignore_ascii_case(value),
            "primaryDepartment" => {
                self.primary_department == value
                    || self.additional_departments.iter().any(|dept| dept == value)
            }
            "searchTerm" => text_matches(value, &[&self.name, &self.email]),
            _ => true,
        }
    }
}

/// Every department referenced by a page of users, unique and sorted.
/// Feeds the department filter dropdown.
pub fn extract_departments(users: &[User]) -> Vec<String> {
    let mut departments = BTreeSet::new();
    for user in users {
        departments.insert(user.primary_department.clone());
        for dept in &user.additional_departments {
            departments.insert(dept.clone());
        }
    }
    departments.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
