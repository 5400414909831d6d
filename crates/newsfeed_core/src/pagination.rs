//! Client-side pagination over the fetched result window.

/// Number of pages needed for `item_count` items.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// Start/end indices of a one-based page, bounded to `total_items`.
pub fn page_window(total_items: usize, page_size: usize, page: usize) -> (usize, usize) {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(total_items);
    let end = start.saturating_add(size).min(total_items);
    (start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to page `n`, clamped to `[1, max(1, total_pages)]`.
    pub fn set_page(&mut self, n: usize, item_count: usize) -> usize {
        let last = total_pages(item_count, self.page_size).max(1);
        self.current_page = n.clamp(1, last);
        self.current_page
    }

    pub fn next(&mut self, item_count: usize) -> usize {
        self.set_page(self.current_page.saturating_add(1), item_count)
    }

    pub fn prev(&mut self, item_count: usize) -> usize {
        self.set_page(self.current_page.saturating_sub(1), item_count)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = page_window(items.len(), self.page_size, self.current_page);
        &items[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Page strip: first, last and neighbours of the current page; page 2 and
/// the second-to-last page collapse into an ellipsis when hidden.
pub fn page_buttons(current: usize, total: usize) -> Vec<PageButton> {
    let mut buttons = Vec::new();
    for page in 1..=total {
        let shown = page == 1 || page == total || current.abs_diff(page) <= 1;
        if shown {
            buttons.push(PageButton::Page(page));
        } else if page == 2 || page + 1 == total {
            buttons.push(PageButton::Ellipsis);
        }
    }
    buttons
}
