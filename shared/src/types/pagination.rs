//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound on page size
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: u32,

    /// Number of items per page
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping both values into range
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }

    /// Build the metadata block for a result set of `total_items`
    pub fn meta(&self, total_items: u64) -> PaginationMeta {
        PaginationMeta::new(total_items, self.page, self.limit)
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl PaginationMeta {
    pub fn new(total_items: u64, current_page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(limit)) as u32
        };
        let has_next_page = current_page < total_pages;
        let has_prev_page = current_page > 1;

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| current_page + 1),
            prev_page: has_prev_page.then(|| current_page - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let meta = PaginationMeta::new(25, 2, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));
    }

    #[test]
    fn test_single_page_has_no_neighbours() {
        let meta = PaginationMeta::new(3, 1, 10);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let json = serde_json::to_value(PaginationMeta::new(0, 1, 10)).unwrap();
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["totalPages"], 0);
        assert!(json["nextPage"].is_null());
    }

    #[test]
    fn test_pagination_clamps_and_offsets() {
        let p = Pagination::new(0, 1000);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }
}
