//! Pagination arithmetic shared by listings and search.
//!
//! Page parameters are parsed leniently: a missing, non-numeric, or
//! non-positive value falls back to the default instead of failing the
//! request.

use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Builds a request from raw query-string values.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit).unwrap_or(DEFAULT_LIMIT);
        Self::new(page, limit)
    }

    /// `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let limit = self.limit_i64();
        (total + limit - 1) / limit
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|v| *v >= 1)
}

/// One page of items plus the total number of matching items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slices an already-filtered, ordered collection into one page.
pub fn paginate<T: Clone>(items: &[T], req: &PageRequest) -> Page<T> {
    let offset = req.offset() as usize;
    let slice = items
        .iter()
        .skip(offset)
        .take(req.limit as usize)
        .cloned()
        .collect();
    Page {
        items: slice,
        total: items.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(1, 10);
        assert_eq!(req.total_pages(25), 3);
        assert_eq!(req.total_pages(20), 2);
        assert_eq!(req.total_pages(0), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(4, 10).offset(), 30);
    }

    #[test]
    fn test_invalid_params_fall_back_to_defaults() {
        assert_eq!(
            PageRequest::from_params(Some("abc"), Some("-3")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_params(Some("0"), None),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_params(Some("2"), Some("25")),
            PageRequest::new(2, 25)
        );
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(PageRequest::from_params(None, Some("50000")).limit, MAX_LIMIT);
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, &PageRequest::new(4, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 25);

        let last = paginate(&items, &PageRequest::new(3, 10));
        assert_eq!(last.items, vec![20, 21, 22, 23, 24]);
    }
}
