//! Debounced search input.
//!
//! Typing in the search box must not fire one list request per
//! keystroke. Each keystroke takes a ticket; after the fixed delay the
//! reload runs only if no newer keystroke has arrived. The owner drives
//! the wait, so the type itself holds no tasks or timers:
//!
//! ```no_run
//! # use opsdesk_views::{debounce, SearchDebouncer};
//! # async fn example(debouncer: &mut SearchDebouncer) {
//! let ticket = debouncer.note_input();
//! debounce::wait().await;
//! if debouncer.is_current(ticket) {
//!     // apply the term and reload
//! }
//! # }
//! ```

use std::time::Duration;

/// Delay between the last keystroke and the search-triggered reload.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Wait out the debounce window.
pub async fn wait() {
    tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
}

/// Decides which search keystroke, if any, gets to reload the list.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    latest: u64,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke, superseding all earlier ones, and return its
    /// ticket.
    pub fn note_input(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether no newer keystroke has arrived since `ticket` was taken.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
