use serde::{Deserialize, Serialize};

/// Posts per feed page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page_number: usize,
  pub total_pages: usize,
  pub has_next: bool,
  pub has_previous: bool,
}

/// Slices an ordered sequence into fixed-size pages. An out-of-range
/// page number clamps to the nearest valid page instead of erroring,
/// and an empty sequence still has one (empty) page.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page_number: usize) -> Page<T> {
  let page_size = page_size.max(1);
  let total_pages = items.len().div_ceil(page_size).max(1);
  let page_number = page_number.clamp(1, total_pages);
  let start = (page_number - 1) * page_size;

  let items = items
    .into_iter()
    .skip(start)
    .take(page_size)
    .collect::<Vec<_>>();

  Page {
    items,
    page_number,
    total_pages,
    has_next: page_number < total_pages,
    has_previous: page_number > 1,
  }
}
