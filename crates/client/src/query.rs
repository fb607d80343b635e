//! Paged list query parameters.
//!
//! Every list endpoint takes the same pagination/sort quartet plus an
//! entity-specific filter map. Empty filter values are skipped when the
//! query string is built, so "no filter" and "filter cleared" produce the
//! same request.

use std::collections::BTreeMap;

use opsdesk_core::SortDirection;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page size a client will request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Clamp a requested page size to the range `1..=MAX_PAGE_SIZE`.
///
/// Returns `DEFAULT_PAGE_SIZE` for zero and caps at `MAX_PAGE_SIZE`.
pub fn clamp_page_size(size: u64) -> u64 {
    if size == 0 {
        DEFAULT_PAGE_SIZE
    } else if size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        size
    }
}

/// Parameters for one paged list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index.
    pub page: u64,
    /// Rows per page.
    pub size: u64,
    /// Field to sort by, e.g. `createdAt`.
    pub sort: String,
    pub direction: SortDirection,
    /// Entity-specific filter fields (`status`, `severity`, `department`,
    /// `searchTerm`, ...) in wire naming.
    pub filter: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new(page: u64, size: u64, sort: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            page,
            size,
            sort: sort.into(),
            direction,
            filter: BTreeMap::new(),
        }
    }

    /// Add a filter field. Empty values are accepted here but skipped
    /// when the query string is built.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// The full set of query pairs for this request: pagination and sort
    /// first, then the filter fields in key order, skipping blank values.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sort".to_string(), self.sort.clone()),
            ("direction".to_string(), self.direction.as_str().to_string()),
        ];
        for (field, value) in &self.filter {
            if !value.trim().is_empty() {
                pairs.push((field.clone(), value.clone()));
            }
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, "createdAt", SortDirection::Desc)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_include_pagination_and_sort() {
        let query = ListQuery::new(2, 25, "updatedAt", SortDirection::Asc);
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "25".to_string()),
                ("sort".to_string(), "updatedAt".to_string()),
                ("direction".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn blank_filter_values_are_skipped() {
        let query = ListQuery::default()
            .with_filter("status", "INVESTIGATING")
            .with_filter("department", "")
            .with_filter("searchTerm", "   ");

        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("status".to_string(), "INVESTIGATING".to_string())));
        assert!(!pairs.iter().any(|(field, _)| field == "department"));
        assert!(!pairs.iter().any(|(field, _)| field == "searchTerm"));
    }

    #[test]
    fn filter_fields_come_out_in_key_order() {
        let query = ListQuery::default()
            .with_filter("severity", "HIGH")
            .with_filter("category", "OTHER");

        let pairs = query.to_query_pairs();
        let fields: Vec<&str> = pairs.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(fields, vec!["page", "size", "sort", "direction", "category", "severity"]);
    }

    #[test]
    fn page_size_clamping() {
        assert_eq!(clamp_page_size(0), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(1), 1);
        assert_eq!(clamp_page_size(50), 50);
        assert_eq!(clamp_page_size(MAX_PAGE_SIZE), MAX_PAGE_SIZE);
        assert_eq!(clamp_page_size(500), MAX_PAGE_SIZE);
    }

    #[test]
    fn default_query_is_first_page_newest_first() {
        let query = ListQuery::default();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.sort, "createdAt");
        assert_eq!(query.direction, SortDirection::Desc);
        assert!(query.filter.is_empty());
    }
}
