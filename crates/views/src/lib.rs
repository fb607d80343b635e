//! List view state for the opsdesk client.
//!
//! One [`ListController`] per entity kind (incidents, change requests,
//! users) mediates between view controls and the paged list endpoint:
//! it composes tab, advanced, and search filters into one query, resets
//! to the first page whenever the criteria change, applies responses
//! through a generation check so an out-of-order reply never overwrites
//! newer data, tallies per-status counts over the loaded page, and
//! persists view preferences (page size, sort, tab, filters, column
//! visibility) as a versioned blob per view.
//!
//! Supporting pieces: [`SearchDebouncer`] bounds the reload rate under
//! fast typing, [`EditModeTracker`] keeps at most one row in edit mode,
//! and [`Notice`] carries transient auto-expiring messages.

pub mod controller;
pub mod debounce;
pub mod editor;
pub mod entities;
pub mod error;
pub mod fetcher;
pub mod notice;
pub mod prefs;
pub mod tabs;

pub use controller::{ListController, LoadOutcome};
pub use debounce::{SearchDebouncer, SEARCH_DEBOUNCE_MS};
pub use editor::EditModeTracker;
pub use entities::{extract_departments, ListEntity};
pub use error::ViewError;
pub use fetcher::{ChangeRequestFetcher, IncidentFetcher, PageFetcher, UserFetcher};
pub use notice::{Notice, NoticeLevel, NOTICE_TTL_MS};
pub use prefs::{ListPrefs, PREFS_VERSION};
pub use tabs::{Tab, ALL_TAB};
