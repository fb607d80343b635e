//! Filter tab tables for the list views.
//!
//! Each view shows a fixed row of tabs. Every tab except "all" maps to
//! one query-parameter pair that the controller folds into the list
//! filter; advanced filter fields override the tab-derived pair when
//! both are set.

use opsdesk_core::{change_request, incident};

/// Identifier of the unfiltered tab every view starts on.
pub const ALL_TAB: &str = "all";

/// One selectable filter tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    /// Stable identifier, persisted in preferences.
    pub id: &'static str,
    /// Human-readable label for display.
    pub label: &'static str,
    /// Query pair applied while the tab is active, `None` for "all".
    pub filter: Option<(&'static str, &'static str)>,
}

/// Tabs for the incident list, one per lifecycle status.
pub static INCIDENT_TABS: &[Tab] = &[
    Tab {
        id: ALL_TAB,
        label: "All",
        filter: None,
    },
    Tab {
        id: "investigating",
        label: "Investigating",
        filter: Some(("status", incident::STATUS_INVESTIGATING)),
    },
    Tab {
        id: "resolved",
        label: "Resolved",
        filter: Some(("status", incident::STATUS_RESOLVED)),
    },
    Tab {
        id: "closed",
        label: "Closed",
        filter: Some(("status", incident::STATUS_CLOSED)),
    },
];

/// Tabs for the change request list, one per workflow status.
pub static CHANGE_REQUEST_TABS: &[Tab] = &[
    Tab {
        id: ALL_TAB,
        label: "All",
        filter: None,
    },
    Tab {
        id: "pending",
        label: "Pending",
        filter: Some(("status", change_request::STATUS_PENDING)),
    },
    Tab {
        id: "approved",
        label: "Approved",
        filter: Some(("status", change_request::STATUS_APPROVED)),
    },
    Tab {
        id: "in_progress",
        label: "In Progress",
        filter: Some(("status", change_request::STATUS_IN_PROGRESS)),
    },
    Tab {
        id: "completed",
        label: "Completed",
        filter: Some(("status", change_request::STATUS_COMPLETED)),
    },
    Tab {
        id: "rejected",
        label: "Rejected",
        filter: Some(("status", change_request::STATUS_REJECTED)),
    },
];

/// Tabs for the user list. Users filter on the `active` flag rather
/// than a status enum; the flag is sent as a string query value.
pub static USER_TABS: &[Tab] = &[
    Tab {
        id: ALL_TAB,
        label: "All",
        filter: None,
    },
    Tab {
        id: "active",
        label: "Active",
        filter: Some(("active", "true")),
    },
    Tab {
        id: "inactive",
        label: "Inactive",
        filter: Some(("active", "false")),
    },
];

/// Look up a tab by identifier.
pub fn find(tabs: &'static [Tab], id: &str) -> Option<&'static Tab> {
    tabs.iter().find(|tab| tab.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
