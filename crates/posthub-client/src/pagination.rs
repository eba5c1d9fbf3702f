//! Fixed-size pagination with a sliding strip of page buttons.

use posthub_shared::constants::PAGE_WINDOW;

/// One-based pagination over a list whose length may change under it.
///
/// The pager never points past the end: [`Pager::set_total`] clamps the
/// current page whenever the list shrinks, so a delete on the last page
/// falls back to the new last page instead of showing an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
    total_items: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            // A zero page size would divide by zero below.
            page_size: page_size.max(1),
            current: 1,
            total_items: 0,
        }
    }

    /// Current page, always in `1..=max(total_pages, 1)`.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; zero when the list is empty.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Record the list length and clamp the current page to it.
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current = self.current.min(self.total_pages().max(1));
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.current = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next(&mut self) {
        self.set_page(self.current + 1);
    }

    pub fn prev(&mut self) {
        self.set_page(self.current.saturating_sub(1));
    }

    /// The slice of `items` belonging to the current page.
    ///
    /// Bounds are computed from the slice itself, so a caller that has not
    /// yet called [`Pager::set_total`] for this list still gets a valid
    /// (possibly empty) slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Page numbers for the button strip: at most [`PAGE_WINDOW`] buttons,
    /// pinned to the edges near them and centered on the current page in
    /// between.
    pub fn window(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total <= PAGE_WINDOW {
            (1..=total).collect()
        } else if self.current <= 3 {
            (1..=PAGE_WINDOW).collect()
        } else if self.current + 2 >= total {
            (total - PAGE_WINDOW + 1..=total).collect()
        } else {
            (self.current - 2..=self.current + 2).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use posthub_shared::constants::POSTS_PER_PAGE;

    #[test]
    fn test_twenty_three_items_make_three_pages() {
        let items: Vec<u32> = (0..23).collect();
        let mut pager = Pager::new(POSTS_PER_PAGE);
        pager.set_total(items.len());

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.slice(&items).len(), 10);

        pager.set_page(2);
        assert_eq!(pager.slice(&items).len(), 10);
        assert_eq!(pager.slice(&items)[0], 10);

        pager.set_page(3);
        assert_eq!(pager.slice(&items), &[20, 21, 22]);
    }

    #[test]
    fn test_set_page_clamps_to_range() {
        let mut pager = Pager::new(10);
        pager.set_total(23);

        pager.set_page(99);
        assert_eq!(pager.current(), 3);
        pager.set_page(0);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_empty_list_stays_on_page_one() {
        let mut pager = Pager::new(10);
        pager.set_total(0);
        assert_eq!(pager.total_pages(), 0);
        assert_eq!(pager.current(), 1);

        let items: Vec<u32> = Vec::new();
        assert!(pager.slice(&items).is_empty());
        assert!(pager.window().is_empty());
    }

    #[test]
    fn test_shrinking_list_rebalances_current_page() {
        let mut pager = Pager::new(10);
        pager.set_total(23);
        pager.set_page(3);

        // Down to 20 items: page 3 no longer exists.
        pager.set_total(20);
        assert_eq!(pager.current(), 2);

        pager.set_total(0);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_next_prev_stop_at_bounds() {
        let mut pager = Pager::new(10);
        pager.set_total(23);

        pager.prev();
        assert_eq!(pager.current(), 1);

        pager.next();
        pager.next();
        pager.next();
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn test_window_shows_all_pages_when_few() {
        let mut pager = Pager::new(10);
        pager.set_total(23);
        assert_eq!(pager.window(), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_pins_to_front() {
        let mut pager = Pager::new(10);
        pager.set_total(100);

        for page in 1..=3 {
            pager.set_page(page);
            assert_eq!(pager.window(), vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_window_pins_to_back() {
        let mut pager = Pager::new(10);
        pager.set_total(100);

        for page in 8..=10 {
            pager.set_page(page);
            assert_eq!(pager.window(), vec![6, 7, 8, 9, 10]);
        }
    }

    #[test]
    fn test_window_centers_in_the_middle() {
        let mut pager = Pager::new(10);
        pager.set_total(100);

        pager.set_page(5);
        assert_eq!(pager.window(), vec![3, 4, 5, 6, 7]);
    }

    proptest! {
        #[test]
        fn prop_current_page_always_valid(
            totals in proptest::collection::vec(0..300usize, 1..20),
            jumps in proptest::collection::vec(0..40usize, 1..20),
        ) {
            let mut pager = Pager::new(10);
            for (total, jump) in totals.iter().zip(jumps.iter()) {
                pager.set_page(*jump);
                pager.set_total(*total);
                prop_assert!(pager.current() >= 1);
                prop_assert!(pager.current() <= pager.total_pages().max(1));
            }
        }

        #[test]
        fn prop_window_contains_current(total in 1..300usize, jump in 1..40usize) {
            let mut pager = Pager::new(10);
            pager.set_total(total);
            pager.set_page(jump);

            let window = pager.window();
            prop_assert_eq!(window.len(), pager.total_pages().min(PAGE_WINDOW));
            prop_assert!(window.contains(&pager.current()));

            // The strip is contiguous and in range.
            for pair in window.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
            prop_assert!(*window.last().unwrap() <= pager.total_pages());
        }

        #[test]
        fn prop_pages_partition_the_list(total in 0..300usize) {
            let items: Vec<usize> = (0..total).collect();
            let mut pager = Pager::new(10);
            pager.set_total(total);

            let mut seen = Vec::new();
            for page in 1..=pager.total_pages() {
                pager.set_page(page);
                seen.extend_from_slice(pager.slice(&items));
            }
            prop_assert_eq!(seen, items);
        }
    }
}
