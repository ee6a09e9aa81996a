/// Page size for the normal-priority tier grid.
pub const NORMAL_PAGE_SIZE: usize = 12;
/// Page size for the low-priority tier grid.
pub const LOW_PAGE_SIZE: usize = 9;

/// A 1-based pagination cursor over a tier's item list. The cursor never
/// errors at a boundary: next/previous clamp, and loading new data resets the
/// page so a reader cannot be stranded beyond the new total.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        debug_assert!(page_size > 0);
        Self {
            page_size,
            current: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Always at least 1, even for an empty list.
    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size).max(1)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        if start >= items.len() {
            &[]
        } else {
            &items[start..end]
        }
    }

    pub fn next(&mut self, item_count: usize) {
        if self.current < self.total_pages(item_count) {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Jump to an explicit page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize, item_count: usize) {
        self.current = page.clamp(1, self.total_pages(item_count));
    }

    /// Back to page 1. Called whenever the underlying item list changes.
    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        let pager = Paginator::new(12);
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(1), 1);
        assert_eq!(pager.total_pages(12), 1);
        assert_eq!(pager.total_pages(13), 2);
        assert_eq!(pager.total_pages(25), 3);
    }

    #[test]
    fn test_pages_cover_all_items_in_order() {
        let items: Vec<u32> = (0..25).collect();
        let mut pager = Paginator::new(9);

        let mut reconstructed = Vec::new();
        for _ in 0..pager.total_pages(items.len()) {
            reconstructed.extend_from_slice(pager.slice(&items));
            pager.next(items.len());
        }

        assert_eq!(reconstructed, items);
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let items: Vec<u32> = (0..20).collect();
        let mut pager = Paginator::new(12);

        pager.previous();
        assert_eq!(pager.current(), 1);

        pager.next(items.len());
        assert_eq!(pager.current(), 2);
        pager.next(items.len());
        assert_eq!(pager.current(), 2);

        pager.previous();
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_slice_empty_list() {
        let items: Vec<u32> = Vec::new();
        let pager = Paginator::new(12);
        assert!(pager.slice(&items).is_empty());
    }

    #[test]
    fn test_set_page_clamps() {
        let items: Vec<u32> = (0..30).collect();
        let mut pager = Paginator::new(12);

        pager.set_page(99, items.len());
        assert_eq!(pager.current(), 3);

        pager.set_page(0, items.len());
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_reset_after_data_shrinks() {
        let items: Vec<u32> = (0..30).collect();
        let mut pager = Paginator::new(12);
        pager.set_page(3, items.len());

        // New, smaller dataset arrives; the cursor must go home.
        let smaller: Vec<u32> = (0..5).collect();
        pager.reset();
        assert_eq!(pager.current(), 1);
        assert_eq!(pager.slice(&smaller), &smaller[..]);
    }
}
