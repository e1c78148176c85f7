//! Pagination contract shared by every repository.
//!
//! List endpoints accept a [`ListParams`] and return a [`Paginated`]
//! envelope. Out-of-range values are reset to the defaults (not clamped
//! to the nearest bound) so that a hostile `perPage=999999` behaves the
//! same as an absent one.

use serde::{Deserialize, Serialize};

/// Default page number (1-based).
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size.
pub const DEFAULT_PER_PAGE: i64 = 20;
/// Maximum accepted page size; larger requests fall back to the default.
pub const MAX_PER_PAGE: i64 = 200;
/// Default sort column when the requested one is not allow-listed.
pub const DEFAULT_SORT_BY: &str = "id";
/// Default sort direction.
pub const DEFAULT_ORDER_BY: &str = "asc";

/// Normalized list/filter parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    /// Requested sort column; validated against a per-repository allow-list.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Requested sort direction (`asc`/`desc`).
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl ListParams {
    /// Create params for the given page and page size with default sorting.
    pub fn new(page: i64, per_page: i64) -> Self {
        let mut params = Self {
            page,
            per_page,
            ..Self::default()
        };
        params.apply_defaults();
        params
    }

    /// Reset out-of-range or missing values to the defaults.
    pub fn apply_defaults(&mut self) {
        if self.page <= 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.per_page <= 0 || self.per_page > MAX_PER_PAGE {
            self.per_page = DEFAULT_PER_PAGE;
        }
        if self.sort_by.is_empty() {
            self.sort_by = DEFAULT_SORT_BY.to_string();
        }
        if self.order_by.is_empty() {
            self.order_by = DEFAULT_ORDER_BY.to_string();
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        if self.page <= 0 {
            return 0;
        }
        (self.page - 1) * self.per_page
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
        }
    }
}

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-based).
    pub current_page: i64,
    /// Number of items per page.
    pub per_page: i64,
    /// Total number of matching items across all pages.
    pub total_items: i64,
    /// Total number of pages.
    pub total_pages: i64,
}

/// Paginated response envelope: the current page of data plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Wrap a page of items in the envelope, computing total pages from
    /// the count query's result (independent of the fetched rows).
    pub fn new(items: Vec<T>, total_items: i64, current_page: i64, per_page: i64) -> Self {
        Self {
            items,
            meta: PageMeta {
                current_page,
                per_page,
                total_items,
                total_pages: calculate_total_pages(total_items, per_page),
            },
        }
    }
}

/// Total pages as `ceil(total_items / per_page)`; defined as 1 when
/// `per_page <= 0`.
pub fn calculate_total_pages(total_items: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 1;
    }
    (total_items + per_page - 1) / per_page
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(ListParams::new(1, 20).offset(), 0);
        assert_eq!(ListParams::new(3, 25).offset(), 50);
        let raw = ListParams {
            page: -2,
            ..ListParams::default()
        };
        assert_eq!(raw.offset(), 0);
    }

    #[test]
    fn test_apply_defaults_resets_out_of_range() {
        let mut params = ListParams {
            page: 0,
            per_page: MAX_PER_PAGE + 1,
            sort_by: String::new(),
            order_by: String::new(),
        };
        params.apply_defaults();
        assert_eq!(params.page, DEFAULT_PAGE);
        // Falls back to the default, not the nearest bound.
        assert_eq!(params.per_page, DEFAULT_PER_PAGE);
        assert_eq!(params.sort_by, DEFAULT_SORT_BY);
        assert_eq!(params.order_by, DEFAULT_ORDER_BY);
    }

    #[test]
    fn test_apply_defaults_keeps_valid_values() {
        let mut params = ListParams {
            page: 4,
            per_page: 50,
            sort_by: "name".to_string(),
            order_by: "desc".to_string(),
        };
        params.apply_defaults();
        assert_eq!(params.page, 4);
        assert_eq!(params.per_page, 50);
        assert_eq!(params.sort_by, "name");
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(calculate_total_pages(5, 2), 3);
        assert_eq!(calculate_total_pages(40, 20), 2);
        assert_eq!(calculate_total_pages(41, 20), 3);
        assert_eq!(calculate_total_pages(0, 20), 0);
        // Defined edge case: non-positive page size.
        assert_eq!(calculate_total_pages(10, 0), 1);
        assert_eq!(calculate_total_pages(10, -5), 1);
    }

    #[test]
    fn test_paginated_envelope_meta() {
        let page = Paginated::new(vec![1, 2], 5, 1, 2);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.meta.total_items, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.current_page, 1);
    }
}
