//! Page-based slicing of an ordered sequence

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Invalid pagination input
///
/// These originate from free-text user input and are never fatal; the grid
/// coerces them to the nearest valid value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page: '{0}'")]
    InvalidPage(String),

    #[error("Invalid page size: '{0}'")]
    InvalidPageSize(String),
}

/// Current page (1-indexed) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// Create a state; zero page or page size is raised to 1
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Clamp the page into `[1, total_pages(total_rows)]`
    pub fn clamped(&self, total_rows: usize) -> Self {
        let page_size = self.page_size.max(1);
        Self {
            page: self.page.clamp(1, total_pages(total_rows, page_size)),
            page_size,
        }
    }

    /// Index of the first row of the page
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.page_size.max(1))
    }
}

/// `max(1, ceil(total_rows / max(1, page_size)))`
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// One page of an ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub data: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

/// Slice a sequence; bounds are clamped to the collection, the page is not
/// corrected (callers clamp the state first)
pub fn paginate<'a, T>(items: &'a [T], state: &PaginationState) -> Page<'a, T> {
    let start = state.offset().min(items.len());
    let end = start.saturating_add(state.page_size.max(1)).min(items.len());
    Page {
        data: &items[start..end],
        page: state.page,
        total_pages: total_pages(items.len(), state.page_size),
    }
}

fn parse_positive(input: &str) -> Option<Result<usize, ()>> {
    let trimmed = input.trim();
    let number = match trimmed.parse::<i64>() {
        Ok(n) => n,
        // Accept "2.0" / "2.7" like a lenient integer parse
        Err(_) => match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => f.trunc() as i64,
            _ => return None,
        },
    };
    Some(usize::try_from(number).ok().filter(|n| *n >= 1).ok_or(()))
}

/// Outcome of coercing free-text pagination input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced {
    /// Value to use
    pub value: usize,
    /// Set when the input was invalid and `value` is a substitute
    pub error: Option<PaginationError>,
}

/// Coerce page input: non-positive -> 1, non-numeric -> `current`
pub fn coerce_page(input: &str, current: usize) -> Coerced {
    coerce(input, current, PaginationError::InvalidPage)
}

/// Coerce page size input: non-positive -> 1, non-numeric -> `current`
pub fn coerce_page_size(input: &str, current: usize) -> Coerced {
    coerce(input, current, PaginationError::InvalidPageSize)
}

fn coerce(input: &str, current: usize, error: fn(String) -> PaginationError) -> Coerced {
    match parse_positive(input) {
        Some(Ok(value)) => Coerced { value, error: None },
        Some(Err(())) => Coerced {
            value: 1,
            error: Some(error(input.to_string())),
        },
        None => Coerced {
            value: current,
            error: Some(error(input.to_string())),
        },
    }
}

/// Page summary handed to renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub first_row: usize,
    /// 1-based index of the last row shown, 0 when empty
    pub last_row: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

impl PageInfo {
    pub fn new(state: &PaginationState, total_rows: usize) -> Self {
        let total_pages = total_pages(total_rows, state.page_size);
        let first = state.offset().min(total_rows);
        let last = first.saturating_add(state.page_size.max(1)).min(total_rows);
        let (first_row, last_row) = if last > first { (first + 1, last) } else { (0, 0) };
        Self {
            page: state.page,
            page_size: state.page_size,
            total_pages,
            total_rows,
            first_row,
            last_row,
            can_go_prev: state.page > 1,
            can_go_next: state.page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
        assert_eq!(total_pages(usize::MAX, 10), usize::MAX / 10 + 1);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, &PaginationState::new(3, 10));
        assert_eq!(page.data, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);

        let out_of_range = paginate(&items, &PaginationState::new(9, 10));
        assert!(out_of_range.data.is_empty());
    }

    #[test]
    fn test_pages_cover_every_item_once() {
        let items: Vec<u32> = (0..47).collect();
        let state = PaginationState::new(1, 6);
        let pages = total_pages(items.len(), state.page_size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            seen.extend_from_slice(paginate(&items, &PaginationState { page, ..state }).data);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(PaginationState::new(7, 10).clamped(25).page, 3);
        assert_eq!(PaginationState::new(7, 10).clamped(0).page, 1);
        assert_eq!(PaginationState { page: 0, page_size: 0 }.clamped(3), PaginationState::new(1, 1));
    }

    #[test]
    fn test_coerce_page_input() {
        assert_eq!(coerce_page("4", 2), Coerced { value: 4, error: None });
        assert_eq!(coerce_page(" 2.9 ", 1).value, 2);
        assert_eq!(
            coerce_page("-3", 2),
            Coerced {
                value: 1,
                error: Some(PaginationError::InvalidPage("-3".to_string())),
            }
        );
        assert_eq!(
            coerce_page_size("lots", 25),
            Coerced {
                value: 25,
                error: Some(PaginationError::InvalidPageSize("lots".to_string())),
            }
        );
        assert_eq!(coerce_page_size("0", 25).value, 1);
    }

    #[test]
    fn test_page_info() {
        let info = PageInfo::new(&PaginationState::new(2, 10), 25);
        assert_eq!(
            info,
            PageInfo {
                page: 2,
                page_size: 10,
                total_pages: 3,
                total_rows: 25,
                first_row: 11,
                last_row: 20,
                can_go_prev: true,
                can_go_next: true,
            }
        );

        let empty = PageInfo::new(&PaginationState::default(), 0);
        assert_eq!((empty.first_row, empty.last_row), (0, 0));
        assert!(!empty.can_go_next);
    }
}
