//! Page slicing over an in-memory collection.
//!
//! `total_items` reports the requested page size rather than the collection
//! length. Existing clients read it that way.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    /// Equals the requested limit, not the collection size.
    pub total_items: usize,
    pub total_pages: usize,
}

/// Validated page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Build from raw query values. Missing values take the defaults and
    /// negative values clamp to zero.
    pub fn from_query(page: Option<i64>, size: Option<i64>, default_size: usize) -> Self {
        let clamp = |v: i64| usize::try_from(v).unwrap_or(0);
        Self {
            page: page.map(clamp).unwrap_or(1),
            limit: size.map(clamp).unwrap_or(default_size),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Slice `items` into the requested page.
///
/// Page numbers are 1-based; page 0 is read as page 1. A zero limit yields an
/// empty page with zero total pages. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Page<T> {
    let page = page.max(1);

    if limit == 0 {
        return Page {
            items: Vec::new(),
            current_page: page,
            total_items: 0,
            total_pages: 0,
        };
    }

    let offset = (page - 1).saturating_mul(limit);
    let slice = if offset >= items.len() {
        Vec::new()
    } else {
        let end = offset.saturating_add(limit).min(items.len());
        items[offset..end].to_vec()
    };

    Page {
        items: slice,
        current_page: page,
        total_items: limit,
        total_pages: items.len().div_ceil(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_many() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_items, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, 4, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn zero_limit_yields_empty_page() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, 1, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn page_zero_reads_as_first_page() {
        let items = vec!["a", "b", "c"];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn empty_collection() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn concatenated_pages_reconstruct_collection() {
        for len in 0..40usize {
            let items: Vec<usize> = (0..len).collect();
            for limit in 1..12usize {
                let page_count = paginate(&items, 1, limit).total_pages;
                let mut rebuilt = Vec::new();
                for page in 1..=page_count {
                    let p = paginate(&items, page, limit);
                    assert!(p.items.len() <= limit);
                    rebuilt.extend(p.items);
                }
                assert_eq!(rebuilt, items, "len={len} limit={limit}");
            }
        }
    }

    #[test]
    fn page_request_from_query_defaults() {
        assert_eq!(
            PageRequest::from_query(None, None, DEFAULT_PAGE_SIZE),
            PageRequest::new(1, 10)
        );
        assert_eq!(
            PageRequest::from_query(Some(2), Some(5), DEFAULT_PAGE_SIZE),
            PageRequest::new(2, 5)
        );
    }

    #[test]
    fn page_request_clamps_negative_values() {
        assert_eq!(
            PageRequest::from_query(Some(-3), Some(-1), DEFAULT_PAGE_SIZE),
            PageRequest::new(0, 0)
        );
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = paginate(&[1, 2, 3], 1, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["items"], serde_json::json!([1, 2]));
    }
}
