//! Incident statuses, severities, categories, and field validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly reported incident.
pub const STATUS_INVESTIGATING: &str = "INVESTIGATING";
/// The underlying issue has been addressed.
pub const STATUS_RESOLVED: &str = "RESOLVED";
/// The incident has been verified and closed.
pub const STATUS_CLOSED: &str = "CLOSED";

/// All valid incident statuses, in wire casing.
pub const VALID_STATUSES: &[&str] = &[STATUS_INVESTIGATING, STATUS_RESOLVED, STATUS_CLOSED];

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Minimum length for the incident title (characters).
pub const TITLE_MIN_LENGTH: usize = 5;
/// Maximum length for the incident title (characters).
pub const TITLE_MAX_LENGTH: usize = 200;
/// Minimum length for the incident description (characters).
pub const DESCRIPTION_MIN_LENGTH: usize = 20;
/// Maximum length for the incident description (characters).
pub const DESCRIPTION_MAX_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    /// Parse a status string, accepting any casing.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            STATUS_INVESTIGATING => Ok(Self::Investigating),
            STATUS_RESOLVED => Ok(Self::Resolved),
            STATUS_CLOSED => Ok(Self::Closed),
            _ => Err(CoreError::Validation(format!(
                "Invalid incident status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// The wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investigating => STATUS_INVESTIGATING,
            Self::Resolved => STATUS_RESOLVED,
            Self::Closed => STATUS_CLOSED,
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Investigating => "Investigating",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Whether the incident can be marked resolved from this status.
    pub fn can_resolve(&self) -> bool {
        matches!(self, Self::Investigating)
    }

    /// Whether the incident can be closed from this status.
    pub fn can_close(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an incident. The same scale is used for the separate
/// risk-level assessment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// The wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root-cause category of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentCategory {
    TechnicalFailure,
    HumanError,
    ExternalFactor,
    SecurityBreach,
    Other,
}

impl IncidentCategory {
    /// The wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalFailure => "TECHNICAL_FAILURE",
            Self::HumanError => "HUMAN_ERROR",
            Self::ExternalFactor => "EXTERNAL_FACTOR",
            Self::SecurityBreach => "SECURITY_BREACH",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TechnicalFailure => "Technical Failure",
            Self::HumanError => "Human Error",
            Self::ExternalFactor => "External Factor",
            Self::SecurityBreach => "Security Breach",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate the incident title length.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if !(TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Title must be between {TITLE_MIN_LENGTH} and {TITLE_MAX_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate the incident description length.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if !(DESCRIPTION_MIN_LENGTH..=DESCRIPTION_MAX_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Description must be between {DESCRIPTION_MIN_LENGTH} and {DESCRIPTION_MAX_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
