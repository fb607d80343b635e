//! User roles and the privileges they carry.
//!
//! Role strings arrive from the API and from persisted session blobs in
//! inconsistent casing. Everything funnels through [`Role::from_str_value`],
//! which is the only place a role string is interpreted; unknown values are
//! rejected instead of being silently mapped to a default.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role constants
// ---------------------------------------------------------------------------

/// Full administrative access, including user management.
pub const ROLE_ADMIN: &str = "ADMIN";
/// May approve, reject, and complete change requests.
pub const ROLE_SUPERVISOR: &str = "SUPERVISOR";
/// Regular user; may report incidents and raise change requests.
pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

/// All valid role strings, in wire casing.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SUPERVISOR, ROLE_EMPLOYEE];

// ---------------------------------------------------------------------------
// Role enum
// ---------------------------------------------------------------------------

/// A user's role within the organization.
///
/// Serialized as the wire string (`"ADMIN"`, ...); deserialization is
/// case-insensitive and fails on unknown strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Supervisor,
    Employee,
}

impl Role {
    /// Parse a role string, accepting any casing.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_SUPERVISOR => Ok(Self::Supervisor),
            ROLE_EMPLOYEE => Ok(Self::Employee),
            _ => Err(CoreError::UnknownRole(s.to_string())),
        }
    }

    /// The wire string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Supervisor => ROLE_SUPERVISOR,
            Self::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Supervisor => "Supervisor",
            Self::Employee => "Employee",
        }
    }

    /// Whether this role carries administrative privileges.
    pub fn grants_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role carries supervisor privileges. Admins are
    /// implicitly supervisors.
    pub fn grants_supervisor(&self) -> bool {
        matches!(self, Self::Admin | Self::Supervisor)
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
