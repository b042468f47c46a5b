// src/paginate.rs
//! Stateless page slicing. The caller owns the cursor (index + size).

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Rows per page, or the whole set on one page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr", into = "PageSizeRepr")]
pub enum PageSize {
    All,
    Fixed(NonZeroUsize),
}

impl PageSize {
    /// `Fixed(n)`, or `None` when `n` is 0.
    pub fn fixed(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(PageSize::Fixed)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::All => f.write_str("all"),
            PageSize::Fixed(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        t.parse::<usize>()
            .ok()
            .and_then(PageSize::fixed)
            .ok_or_else(|| Error::InvalidPageSize(s.to_string()))
    }
}

/// Config-file form: a number or the string "all".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSizeRepr {
    Count(usize),
    Text(String),
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = Error;
    fn try_from(r: PageSizeRepr) -> Result<Self, Self::Error> {
        match r {
            PageSizeRepr::Count(n) => PageSize::fixed(n).ok_or_else(|| Error::InvalidPageSize(n.to_string())),
            PageSizeRepr::Text(s) => s.parse(),
        }
    }
}

impl From<PageSize> for PageSizeRepr {
    fn from(p: PageSize) -> Self {
        match p {
            PageSize::All => PageSizeRepr::Text("all".into()),
            PageSize::Fixed(n) => PageSizeRepr::Count(n.get()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub page_index: usize,
    pub total_items: usize,
}

/// Number of pages `total_items` needs. `All` is always one page.
pub fn total_pages(total_items: usize, size: PageSize) -> usize {
    match size {
        PageSize::All => 1,
        PageSize::Fixed(n) => total_items.div_ceil(n.get()),
    }
}

/// Slice page `page_index` (1-based) out of `set`.
///
/// Index 0 or past the last page gives empty `items`, not an error.
pub fn paginate<T: Clone>(set: &[T], page_index: usize, size: PageSize) -> Page<T> {
    let total_items = set.len();
    let total = total_pages(total_items, size);

    let items = match size {
        PageSize::All => set.to_vec(),
        PageSize::Fixed(n) => {
            let n = n.get();
            match page_index.checked_sub(1).and_then(|i| i.checked_mul(n)) {
                Some(start) if start < total_items => {
                    let end = start.saturating_add(n).min(total_items);
                    set[start..end].to_vec()
                }
                _ => Vec::new(),
            }
        }
    };

    Page { items, total_pages: total, page_index, total_items }
}

/// Pull an out-of-range index back to the nearest real page (1 when there are none).
pub fn clamp_page(page_index: usize, total_pages: usize) -> usize {
    page_index.clamp(1, total_pages.max(1))
}

/// Which page buttons a pager shows around the current page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current: usize,
    /// First and last numbered page in the window (inclusive).
    pub start: usize,
    pub end: usize,
    /// Pages hidden between page 1 / the last page and the window.
    pub leading_gap: bool,
    pub trailing_gap: bool,
    /// Jump-to-first / jump-to-last buttons, shown when the window hides them.
    pub first: bool,
    pub last: bool,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Window of at most `width` page numbers centred on `current`.
/// `None` when there is nothing to page through.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Option<PageWindow> {
    if total_pages <= 1 {
        return None;
    }
    let width = width.max(1);
    let current = clamp_page(current, total_pages);

    let mut start = current.saturating_sub(width / 2).max(1);
    let end = start.saturating_add(width - 1).min(total_pages);
    if end - start < width - 1 {
        start = end.saturating_sub(width - 1).max(1);
    }

    Some(PageWindow {
        current,
        start,
        end,
        leading_gap: start > 2,
        trailing_gap: end < total_pages - 1,
        first: start > 1,
        last: end < total_pages,
        prev: (current > 1).then(|| current - 1),
        next: (current < total_pages).then(|| current + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize { PageSize::fixed(n).unwrap() }

    #[test]
    fn slices_and_counts() {
        let v: Vec<u32> = (1..=7).collect();
        let p = paginate(&v, 3, size(3));
        assert_eq!(p.items, vec![7]);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total_items, 7);
        assert_eq!(p.page_index, 3);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let v: Vec<u32> = (1..=4).collect();
        assert!(paginate(&v, 0, size(2)).items.is_empty());
        assert!(paginate(&v, 3, size(2)).items.is_empty());
        assert!(paginate(&v, usize::MAX, size(2)).items.is_empty());
    }

    #[test]
    fn all_is_one_page() {
        let v: Vec<u32> = (1..=4).collect();
        let p = paginate(&v, 1, PageSize::All);
        assert_eq!(p.items, v);
        assert_eq!(p.total_pages, 1);

        let empty: Vec<u32> = Vec::new();
        assert_eq!(paginate(&empty, 1, PageSize::All).total_pages, 1);
        assert_eq!(paginate(&empty, 1, size(10)).total_pages, 0);
    }

    #[test]
    fn page_size_parsing() {
        assert_eq!("all".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!(" 25 ".parse::<PageSize>().unwrap(), size(25));
        assert!("0".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
    }

    #[test]
    fn window_near_edges_and_middle() {
        assert_eq!(page_window(1, 1, 5), None);

        let w = page_window(1, 10, 5).unwrap();
        assert_eq!((w.start, w.end), (1, 5));
        assert!(!w.first && !w.leading_gap && w.last && w.trailing_gap);
        assert_eq!((w.prev, w.next), (None, Some(2)));

        let w = page_window(6, 10, 5).unwrap();
        assert_eq!((w.start, w.end), (4, 8));
        assert!(w.first && w.leading_gap && w.last && w.trailing_gap);

        let w = page_window(10, 10, 5).unwrap();
        assert_eq!((w.start, w.end), (6, 10));
        assert!(w.first && !w.last && !w.trailing_gap);
        assert_eq!((w.prev, w.next), (Some(9), None));

        let w = page_window(2, 3, 5).unwrap();
        assert_eq!((w.start, w.end), (1, 3));

        let w = page_window(5, 7, 5).unwrap();
        assert_eq!((w.start, w.end), (3, 7));
        assert!(w.first && w.leading_gap);

        // one-page gap: button for page 1 but no ellipsis
        let w = page_window(4, 7, 5).unwrap();
        assert_eq!((w.start, w.end), (2, 6));
        assert!(w.first && !w.leading_gap && w.last && !w.trailing_gap);
    }

    #[test]
    fn huge_window_width_covers_everything() {
        let w = page_window(2, 3, usize::MAX).unwrap();
        assert_eq!((w.start, w.end), (1, 3));
        assert!(!w.first && !w.last);
        let w = page_window(usize::MAX, usize::MAX, usize::MAX).unwrap();
        assert_eq!((w.start, w.end, w.current), (1, usize::MAX, usize::MAX));
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(9, 4), 4);
        assert_eq!(clamp_page(3, 0), 1);
    }
}
