//! Page window over a collection owned elsewhere.
//!
//! [`Pagination`] stores only the current page (1-based) and the page size.
//! Everything else is derived from the length of the collection passed into
//! each call, so nothing needs invalidating when the collection is replaced.

/// Default number of items per page.
pub const DEFAULT_PER_PAGE: usize = 4;

/// Messages for page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Move to the next page.
    NextPage,
    /// Move to the previous page.
    PrevPage,
    /// Jump to a specific page (1-based).
    GotoPage(usize),
    /// Change the page size; returns to the first page.
    SetPerPage(usize),
}

/// Summary of the current window, for "showing 9-10 of 10" style labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current: usize,
    pub total: usize,
    /// 1-based first item on the page, 0 for an empty collection.
    pub showing_from: usize,
    /// 1-based last item on the page, 0 for an empty collection.
    pub showing_to: usize,
    pub total_items: usize,
}

/// Current page and page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Pagination {
    /// Start on page 1 with `per_page` items per page (minimum 1).
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// The current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// `ceil(total_items / per_page)`, never less than 1.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.per_page).max(1)
    }

    /// Jump to page `n`. Out-of-range pages are ignored and return `false`.
    pub fn go_to_page(&mut self, n: usize, total_items: usize) -> bool {
        if n < 1 || n > self.total_pages(total_items) {
            return false;
        }
        self.page = n;
        true
    }

    pub fn next_page(&mut self, total_items: usize) -> bool {
        self.go_to_page(self.page + 1, total_items)
    }

    pub fn prev_page(&mut self, total_items: usize) -> bool {
        self.page > 1 && self.go_to_page(self.page - 1, total_items)
    }

    pub fn has_next_page(&self, total_items: usize) -> bool {
        self.page < self.total_pages(total_items)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Force page 1 regardless of the collection.
    pub fn reset_to_first_page(&mut self) {
        self.page = 1;
    }

    /// Change the page size (minimum 1) and return to page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// Apply a navigation message. Returns whether the window changed.
    pub fn apply(&mut self, msg: Message, total_items: usize) -> bool {
        match msg {
            Message::NextPage => self.next_page(total_items),
            Message::PrevPage => self.prev_page(total_items),
            Message::GotoPage(n) => self.go_to_page(n, total_items),
            Message::SetPerPage(n) => {
                let before = self.clone();
                self.set_per_page(n);
                *self != before
            }
        }
    }

    /// How many items the current page holds.
    ///
    /// With 10 items and 4 per page, pages 1 and 2 hold 4 and page 3 holds 2.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let start = self.offset();
        if start >= total_items {
            return 0;
        }
        (total_items - start).min(self.per_page)
    }

    pub fn page_info(&self, total_items: usize) -> PageInfo {
        let on_page = self.items_on_page(total_items);
        let (showing_from, showing_to) = if on_page == 0 {
            (0, 0)
        } else {
            (self.offset() + 1, self.offset() + on_page)
        };
        PageInfo {
            current: self.page,
            total: self.total_pages(total_items),
            showing_from,
            showing_to,
            total_items,
        }
    }

    /// The items on the current page, clipped to the collection.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }

    /// Page numbers for a pager control: every page when they fit in
    /// `max_visible`, otherwise a window starting half a window before the
    /// current page and clipped to the last page.
    pub fn visible_page_numbers(&self, max_visible: usize, total_items: usize) -> Vec<usize> {
        let total = self.total_pages(total_items);
        if max_visible == 0 {
            return Vec::new();
        }
        if total <= max_visible {
            return (1..=total).collect();
        }
        let start = self.page.saturating_sub(max_visible / 2).max(1);
        let end = total.min(start + max_visible - 1);
        (start..=end).collect()
    }

    fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn four_per_page_over_ten_items() {
        let mut pages = Pagination::new(4);
        assert_eq!(pages.total_pages(10), 3);

        assert!(pages.go_to_page(3, 10));
        let info = pages.page_info(10);
        assert_eq!(info.showing_from, 9);
        assert_eq!(info.showing_to, 10);
        assert_eq!(info.total_items, 10);
        assert_eq!(pages.visible_slice(&items(10)), &[9, 10]);

        assert!(!pages.go_to_page(4, 10));
        assert_eq!(pages.page(), 3);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        let pages = Pagination::new(4);
        for (len, expected) in [(0, 1), (1, 1), (4, 1), (5, 2), (8, 2), (9, 3)] {
            assert_eq!(pages.total_pages(len), expected, "len {len}");
        }
    }

    #[test]
    fn page_stays_in_range_under_navigation() {
        for len in 0..=13 {
            for per_page in 1..=5 {
                let mut pages = Pagination::new(per_page);
                let ops = [
                    Message::PrevPage,
                    Message::NextPage,
                    Message::NextPage,
                    Message::GotoPage(0),
                    Message::GotoPage(99),
                    Message::NextPage,
                    Message::NextPage,
                    Message::NextPage,
                    Message::PrevPage,
                ];
                for op in ops {
                    pages.apply(op, len);
                    let total = pages.total_pages(len);
                    assert!((1..=total).contains(&pages.page()), "len {len} per {per_page}");

                    let all = items(len);
                    let slice = pages.visible_slice(&all);
                    let start = (pages.page() - 1) * per_page;
                    assert_eq!(slice.len(), per_page.min(len.saturating_sub(start)));
                    assert_eq!(slice.len(), pages.items_on_page(len));
                }
            }
        }
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut pages = Pagination::new(4);
        assert!(!pages.prev_page(10));
        assert!(!pages.has_prev_page());
        assert!(pages.next_page(10));
        assert!(pages.next_page(10));
        assert!(!pages.has_next_page(10));
        assert!(!pages.next_page(10));
        assert_eq!(pages.page(), 3);
    }

    #[test]
    fn empty_collection_shows_nothing() {
        let pages = Pagination::new(4);
        let info = pages.page_info(0);
        assert_eq!((info.current, info.total), (1, 1));
        assert_eq!((info.showing_from, info.showing_to), (0, 0));
        assert!(pages.visible_slice::<usize>(&[]).is_empty());
    }

    #[test]
    fn reset_and_per_page_return_to_first_page() {
        let mut pages = Pagination::new(2);
        pages.go_to_page(4, 10);
        pages.reset_to_first_page();
        assert_eq!(pages.page(), 1);

        pages.go_to_page(3, 10);
        assert!(pages.apply(Message::SetPerPage(0), 10));
        assert_eq!((pages.page(), pages.per_page()), (1, 1));
        assert!(!pages.apply(Message::SetPerPage(1), 10));
    }

    #[test]
    fn page_numbers_window() {
        let mut pages = Pagination::new(1);
        assert_eq!(pages.visible_page_numbers(5, 3), vec![1, 2, 3]);
        assert_eq!(pages.visible_page_numbers(5, 10), vec![1, 2, 3, 4, 5]);

        pages.go_to_page(6, 10);
        assert_eq!(pages.visible_page_numbers(5, 10), vec![4, 5, 6, 7, 8]);

        // Near the end the window is clipped rather than shifted back.
        pages.go_to_page(10, 10);
        assert_eq!(pages.visible_page_numbers(5, 10), vec![8, 9, 10]);

        assert!(pages.visible_page_numbers(0, 10).is_empty());
    }
}
