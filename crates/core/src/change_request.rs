//! Change request statuses, workflow transitions, and permission gates.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::role::Role;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly raised change request.
pub const STATUS_PENDING: &str = "PENDING";
/// A supervisor has approved the change for implementation.
pub const STATUS_APPROVED: &str = "APPROVED";
/// A supervisor has rejected the change.
pub const STATUS_REJECTED: &str = "REJECTED";
/// Implementation work has started.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
/// The change has been implemented and verified.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// All valid change request statuses, in wire casing.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
];

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Lifecycle status of a change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
}

impl ChangeRequestStatus {
    /// Parse a status string, accepting any casing.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid change request status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// The wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl std::fmt::Display for ChangeRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from` may transition to.
///
/// Transition rules:
/// - `PENDING`     -> `APPROVED`, `REJECTED`
/// - `APPROVED`    -> `IN_PROGRESS`, `COMPLETED`
/// - `IN_PROGRESS` -> `COMPLETED`
/// - `REJECTED`    -> (terminal)
/// - `COMPLETED`   -> (terminal)
pub fn valid_transitions(from: ChangeRequestStatus) -> &'static [ChangeRequestStatus] {
    use ChangeRequestStatus::*;
    match from {
        Pending => &[Approved, Rejected],
        Approved => &[InProgress, Completed],
        InProgress => &[Completed],
        Rejected => &[],
        Completed => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(
    current: ChangeRequestStatus,
    next: ChangeRequestStatus,
) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition change request from '{current}' to '{next}'. Allowed: {:?}",
            allowed.iter().map(|s| s.as_str()).collect::<Vec<_>>()
        )))
    }
}

// ---------------------------------------------------------------------------
// Permission gates
// ---------------------------------------------------------------------------

/// Whether a change request in `status` may be edited by a user with
/// `role`. Only pending requests are editable, and only by supervisors.
pub fn can_edit(status: ChangeRequestStatus, role: Role) -> bool {
    status == ChangeRequestStatus::Pending && role.grants_supervisor()
}

/// Whether a change request in `status` may be approved or rejected by a
/// user with `role`.
pub fn can_approve(status: ChangeRequestStatus, role: Role) -> bool {
    status == ChangeRequestStatus::Pending && role.grants_supervisor()
}

/// Whether a change request in `status` may be marked completed by a user
/// with `role`.
pub fn can_complete(status: ChangeRequestStatus, role: Role) -> bool {
    status == ChangeRequestStatus::Approved && role.grants_supervisor()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
