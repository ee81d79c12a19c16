//! Pagination helpers
//!
//! Shared query parameters and the `{total, page, per_page, pages, items}`
//! response envelope used by every listing endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Common listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Free-text search (meaning is endpoint-specific)
    pub search: Option<String>,
    /// Status / role filter (validated by the endpoint)
    pub status: Option<String>,
    pub role: Option<String>,
    /// Date filter `YYYY-MM-DD` (reservations only)
    pub date: Option<String>,
}

impl ListQuery {
    /// Page number, clamped to >= 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to 1..=MAX_PER_PAGE
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// OFFSET for the current page
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    /// Trimmed non-empty search term
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub pages: i64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        let per_page = query.per_page();
        Self {
            total,
            page: query.page(),
            per_page,
            pages: total_pages(total, per_page),
            items,
        }
    }
}

/// Ceiling division: number of pages required to hold `total` rows
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_is_ceiling_division() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn page_and_per_page_are_clamped() {
        let q = ListQuery {
            page: Some(0),
            per_page: Some(5000),
            ..Default::default()
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), MAX_PER_PAGE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn defaults() {
        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), DEFAULT_PER_PAGE);
        assert!(q.search_term().is_none());
    }
}
