use crate::{dto::output::PageButton, error::Error};

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 8, 10, 15, 20];
pub const DEFAULT_PAGE_SIZE: usize = 8;

///
/// Page window over a list of items.
///
/// Pages are numbered from 1. An empty list has 0 pages,
/// in that case the only valid page is still 1 and it is empty.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl Paginator {
    ///
    /// ### Errors
    /// - [Error::InvalidPageSize] when page_size is not one of [PAGE_SIZE_OPTIONS]
    ///
    pub fn new(page_size: usize) -> Result<Self, Error> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(Error::InvalidPageSize(page_size));
        }

        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    pub fn clamp_page(&self, total_items: usize, page: usize) -> usize {
        let last_page = self.total_pages(total_items).max(1);

        page.clamp(1, last_page)
    }

    pub fn next_page(&self, total_items: usize, current_page: usize) -> usize {
        self.clamp_page(total_items, current_page.saturating_add(1))
    }

    pub fn prev_page(&self, total_items: usize, current_page: usize) -> usize {
        self.clamp_page(total_items, current_page.saturating_sub(1))
    }

    ///
    /// Slice of `items` shown on `current_page`.
    /// Page out of range is clamped to the nearest existing one.
    ///
    pub fn page<'a, T>(&self, items: &'a [T], current_page: usize) -> Page<'a, T> {
        let total_items = items.len();
        let current_page = self.clamp_page(total_items, current_page);

        let start = ((current_page - 1) * self.page_size).min(total_items);
        let end = (start + self.page_size).min(total_items);

        Page {
            items: &items[start..end],
            total_items,
            total_pages: self.total_pages(total_items),
            current_page,
        }
    }
}

///
/// Page number buttons for pagination controls.
///
/// First and last page are always shown together with the pages
/// right before and after the current one. A gap of a single page
/// shows that page, longer gaps collapse into one [PageButton::Ellipsis].
///
pub fn page_buttons(current_page: usize, total_pages: usize) -> Vec<PageButton> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current_page = current_page.clamp(1, total_pages);

    let mut pages = vec![
        1,
        current_page.saturating_sub(1),
        current_page,
        current_page + 1,
        total_pages,
    ];
    pages.retain(|page| (1..=total_pages).contains(page));
    pages.sort_unstable();
    pages.dedup();

    let mut buttons = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if let Some(previous) = previous {
            match page - previous {
                2 => buttons.push(PageButton::Page(previous + 1)),
                gap if gap > 2 => buttons.push(PageButton::Ellipsis),
                _ => {}
            }
        }
        buttons.push(PageButton::Page(page));
        previous = Some(page);
    }

    buttons
}
