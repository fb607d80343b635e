//! Well-known storage keys.
//!
//! Every piece of persisted client state lives under one of these keys so
//! the full local footprint is visible in one place.

/// The persisted session blob (token plus embedded user).
pub const AUTH_TOKEN: &str = "auth_token";

/// The cached user record, stored separately so the identity survives a
/// token rewrite.
pub const AUTH_USER: &str = "auth_user";

/// Prefix for per-view preference blobs.
pub const PREFS_PREFIX: &str = "prefs:";

/// Preference key for a list view, e.g. `prefs:incidents`.
pub fn prefs_key(view: &str) -> String {
    format!("{PREFS_PREFIX}{view}")
}
