//! Page arithmetic
//!
//! Maps a flat entry count onto fixed-capacity pages. Vertical moves cycle
//! inside the current page only, horizontal moves cycle over pages.

/// Entry count split into pages of `capacity` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageModel {
    total_entries: usize,
    capacity: usize,
}

impl PageModel {
    /// `capacity` is clamped to at least one entry per page
    pub const fn new(total_entries: usize, capacity: usize) -> Self {
        let capacity = if capacity == 0 { 1 } else { capacity };
        Self {
            total_entries,
            capacity,
        }
    }

    #[inline]
    pub const fn total_entries(&self) -> usize {
        self.total_entries
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// `max(1, ceil(total_entries / capacity))`
    pub const fn total_pages(&self) -> usize {
        let pages = self.total_entries.div_ceil(self.capacity);
        if pages == 0 { 1 } else { pages }
    }

    /// Entries visible on `page`, zero for pages past the end
    pub const fn entries_in_page(&self, page: usize) -> usize {
        let start = page.saturating_mul(self.capacity);
        let remaining = self.total_entries.saturating_sub(start);
        if remaining < self.capacity { remaining } else { self.capacity }
    }

    /// Logical offset of `entry` on `page`, counted from the start of the listing
    #[inline]
    pub const fn logical_index(&self, page: usize, entry: usize) -> usize {
        page * self.capacity + entry
    }

    /// Entry after `entry`, wrapping to 0 at the end of the page
    pub const fn next_entry(&self, page: usize, entry: usize) -> usize {
        let count = self.entries_in_page(page);
        if entry + 1 >= count { 0 } else { entry + 1 }
    }

    /// Entry before `entry`, wrapping to the last entry of the page
    pub const fn previous_entry(&self, page: usize, entry: usize) -> usize {
        let count = self.entries_in_page(page);
        if entry == 0 || entry > count {
            count.saturating_sub(1)
        } else {
            entry - 1
        }
    }

    /// Page to the right, wrapping to page 0
    pub const fn next_page(&self, page: usize) -> usize {
        if page + 1 >= self.total_pages() { 0 } else { page + 1 }
    }

    /// Page to the left, wrapping to the last page
    pub const fn previous_page(&self, page: usize) -> usize {
        if page == 0 {
            self.total_pages() - 1
        } else {
            page - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        for capacity in 1..20 {
            for total in 0..100 {
                let model = PageModel::new(total, capacity);
                let expected = core::cmp::max(1, total.div_ceil(capacity));
                assert_eq!(model.total_pages(), expected, "total={total} cap={capacity}");
            }
        }
    }

    #[test]
    fn test_pages_cover_all_entries() {
        for capacity in 1..20 {
            for total in 0..100 {
                let model = PageModel::new(total, capacity);
                let sum: usize = (0..model.total_pages())
                    .map(|p| {
                        let n = model.entries_in_page(p);
                        assert!(n <= capacity);
                        n
                    })
                    .sum();
                assert_eq!(sum, total, "total={total} cap={capacity}");
            }
        }
    }

    #[test]
    fn test_vertical_cycle_stays_on_page() {
        let model = PageModel::new(26, 12);
        for page in 0..model.total_pages() {
            let count = model.entries_in_page(page);
            for start in 0..count {
                let mut entry = start;
                for step in 1..=count {
                    entry = model.next_entry(page, entry);
                    assert!(entry < count);
                    if step < count {
                        assert_ne!(entry, start);
                    }
                }
                assert_eq!(entry, start);
            }
        }
    }

    #[test]
    fn test_previous_wraps_to_last_on_page() {
        let model = PageModel::new(26, 12);
        assert_eq!(model.previous_entry(0, 0), 11);
        assert_eq!(model.previous_entry(2, 0), 1);
        assert_eq!(model.previous_entry(2, 1), 0);
        assert_eq!(model.next_entry(2, 1), 0);
    }

    #[test]
    fn test_horizontal_cycle() {
        let model = PageModel::new(26, 12);
        let mut page = 0;
        for _ in 0..model.total_pages() {
            page = model.next_page(page);
        }
        assert_eq!(page, 0);
        assert_eq!(model.previous_page(0), 2);
    }

    #[test]
    fn test_seven_files_single_page() {
        let model = PageModel::new(8, 12);
        assert_eq!(model.total_pages(), 1);
        assert_eq!(model.entries_in_page(0), 8);
        assert_eq!(model.next_page(0), 0);
        assert_eq!(model.previous_page(0), 0);
    }

    #[test]
    fn test_twenty_five_files() {
        let model = PageModel::new(26, 12);
        assert_eq!(model.total_pages(), 3);
        assert_eq!(model.entries_in_page(2), 2);
        assert_eq!(model.logical_index(2, 1), 25);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let model = PageModel::new(0, 12);
        assert_eq!(model.total_pages(), 1);
        assert_eq!(model.entries_in_page(0), 0);
        assert_eq!(model.next_entry(0, 0), 0);
        assert_eq!(model.previous_entry(0, 0), 0);
    }
}
