//! The paged response envelope.

use serde::{Deserialize, Serialize};

/// One page of a paged list response.
///
/// The server wraps list results in a Spring-style page object; only the
/// fields the client uses are modeled, the rest (`pageable`, `sort`,
/// `first`, `last`, ...) are ignored on deserialize. A page is an
/// immutable snapshot and the sole source of truth for the current view;
/// it is never merged with previously loaded pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u64,
    /// Requested page size.
    #[serde(default)]
    pub size: u64,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
