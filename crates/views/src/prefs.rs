//! Versioned per-view list preferences.
//!
//! One blob per list view under `prefs:<view>`, persisted verbatim on
//! every mutation and restored at controller construction. Every field
//! carries a serde default so blobs written by older clients (including
//! pre-versioning ones, which lack the `version` field) still load;
//! unknown fields from newer clients are ignored on read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use opsdesk_client::{ListQuery, DEFAULT_PAGE_SIZE};
use opsdesk_core::SortDirection;
use opsdesk_store::{json, keys, KvStore, StoreError};

use crate::tabs::ALL_TAB;

/// Current shape version of the stored blob.
pub const PREFS_VERSION: u32 = 1;

/// Lists sort by creation time, newest first, until changed.
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_field() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

fn default_sort_direction() -> SortDirection {
    SortDirection::Desc
}

fn default_tab() -> String {
    ALL_TAB.to_string()
}

/// Persisted state of one list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrefs {
    /// Missing in blobs written before shapes were versioned, so the
    /// field default is 0 and [`ListPrefs::load`] stamps it forward.
    #[serde(default)]
    pub version: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
    #[serde(default = "default_sort_direction")]
    pub sort_direction: SortDirection,
    #[serde(default = "default_tab")]
    pub active_tab: String,
    /// Advanced filter fields by query-parameter name. Empty values are
    /// never stored.
    #[serde(default)]
    pub advanced: HashMap<String, String>,
    /// Column visibility by column name. A column absent from the map
    /// is visible.
    #[serde(default)]
    pub columns: HashMap<String, bool>,
}

impl Default for ListPrefs {
    fn default() -> Self {
        Self {
            version: PREFS_VERSION,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::Desc,
            active_tab: ALL_TAB.to_string(),
            advanced: HashMap::new(),
            columns: HashMap::new(),
        }
    }
}

impl ListPrefs {
    /// Load the preferences for a view, migrating older shapes. Missing
    /// or unreadable blobs fall back to defaults.
    pub fn load(store: &dyn KvStore, view: &str) -> Result<Self, StoreError> {
        let key = keys::prefs_key(view);
        let Some(stored) = json::get_json::<ListPrefs>(store, &key)? else {
            return Ok(Self::default());
        };
        Ok(stored.migrated(view))
    }

    /// Persist the full record, replacing any previous blob.
    pub fn save(&self, store: &dyn KvStore, view: &str) -> Result<(), StoreError> {
        json::set_json(store, &keys::prefs_key(view), self)
    }

    /// Bring a stored record up to [`PREFS_VERSION`].
    fn migrated(mut self, view: &str) -> Self {
        match self.version {
            PREFS_VERSION => self,
            0 => {
                // Pre-versioning blobs carried the same fields under
                // the same names; stamping the version is the whole
                // migration.
                tracing::debug!(view, "Migrating stored preferences from version 0");
                self.version = PREFS_VERSION;
                self
            }
            newer => {
                tracing::warn!(
                    view,
                    version = newer,
                    "Stored preferences were written by a newer client; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Whether a column is visible. Columns the user never touched are
    /// visible.
    pub fn is_column_visible(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(true)
    }

    /// The pagination/sort portion of a list query built from these
    /// preferences, before any filter fields are folded in.
    pub fn base_query(&self, page: u64) -> ListQuery {
        ListQuery::new(page, self.page_size, self.sort_field.clone(), self.sort_direction)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
