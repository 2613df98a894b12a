use std::cmp::min;

/// Fixed page size of the readings table.
pub const RECORDS_PER_PAGE: u32 = 25;

/// Page arithmetic for one request: the effective page after clamping, the
/// page count, and the record count the count query reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl Pagination {
    /// Clamp a requested page against the record count. An empty result set
    /// still yields a single empty page, so navigation has somewhere to
    /// stand.
    pub fn new(requested_page: u32, total_records: u64) -> Self {
        if total_records == 0 {
            return Self {
                page: 1,
                total_pages: 1,
                total_records: 0,
            };
        }

        let total_pages = total_records.div_ceil(RECORDS_PER_PAGE as u64) as u32;
        let page = requested_page.clamp(1, total_pages);

        Self {
            page,
            total_pages,
            total_records,
        }
    }

    /// Rows to skip before the effective page starts. Never negative by
    /// construction.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * RECORDS_PER_PAGE as u64
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first record shown on this page.
    pub fn showing_from(&self) -> u64 {
        self.offset() + 1
    }

    /// 1-based index of the last record shown on this page.
    pub fn showing_to(&self) -> u64 {
        min(self.page as u64 * RECORDS_PER_PAGE as u64, self.total_records)
    }
}

/// One direct navigation link around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub current: bool,
}

/// The contiguous page-number window around the current page, plus the
/// flags for the fixed first/last links and their ellipses. Pure data; the
/// template renders it without doing any arithmetic of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub links: Vec<PageLink>,
    pub show_first: bool,
    pub leading_ellipsis: bool,
    pub show_last: bool,
    pub trailing_ellipsis: bool,
}

/// `[max(1, page - 2), min(total_pages, page + 2)]` and its boundary flags.
pub fn page_window(page: u32, total_pages: u32) -> PageWindow {
    let start = page.saturating_sub(2).max(1);
    let end = page.saturating_add(2).min(total_pages);

    PageWindow {
        links: (start..=end)
            .map(|number| PageLink {
                number,
                current: number == page,
            })
            .collect(),
        show_first: start > 1,
        leading_ellipsis: start > 2,
        show_last: end < total_pages,
        trailing_ellipsis: end + 1 < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_numbers(window: &PageWindow) -> Vec<u32> {
        window.links.iter().map(|link| link.number).collect()
    }

    #[test]
    fn zero_records_yield_a_single_empty_page() {
        let pagination = Pagination::new(5, 0);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.total_records, 0);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn total_pages_is_ceil_of_records_over_page_size() {
        assert_eq!(Pagination::new(1, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 25).total_pages, 1);
        assert_eq!(Pagination::new(1, 26).total_pages, 2);
        assert_eq!(Pagination::new(1, 250).total_pages, 10);
        assert_eq!(Pagination::new(1, 251).total_pages, 11);
    }

    #[test]
    fn out_of_range_page_is_clamped_to_last_page() {
        let pagination = Pagination::new(99, 250);
        assert_eq!(pagination.page, 10);
        assert_eq!(pagination.offset(), 225);
    }

    #[test]
    fn page_zero_is_clamped_to_first_page() {
        let pagination = Pagination::new(0, 250);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn offset_matches_effective_page() {
        for page in 1..=10u32 {
            let pagination = Pagination::new(page, 250);
            assert_eq!(pagination.offset(), (page as u64 - 1) * 25);
        }
    }

    #[test]
    fn showing_range_covers_a_full_middle_page() {
        let pagination = Pagination::new(3, 250);
        assert_eq!(pagination.showing_from(), 51);
        assert_eq!(pagination.showing_to(), 75);
    }

    #[test]
    fn showing_range_is_cut_short_on_the_last_page() {
        let pagination = Pagination::new(11, 251);
        assert_eq!(pagination.showing_from(), 251);
        assert_eq!(pagination.showing_to(), 251);
    }

    #[test]
    fn window_around_the_middle_shows_both_boundaries() {
        let window = page_window(5, 10);
        assert_eq!(window_numbers(&window), vec![3, 4, 5, 6, 7]);
        assert!(window.show_first);
        assert!(window.leading_ellipsis);
        assert!(window.show_last);
        assert!(window.trailing_ellipsis);
        assert!(window.links[2].current);
    }

    #[test]
    fn window_at_the_start_needs_no_first_link() {
        let window = page_window(1, 10);
        assert_eq!(window_numbers(&window), vec![1, 2, 3]);
        assert!(!window.show_first);
        assert!(!window.leading_ellipsis);
        assert!(window.show_last);
        assert!(window.trailing_ellipsis);
    }

    #[test]
    fn window_at_the_end_needs_no_last_link() {
        let window = page_window(10, 10);
        assert_eq!(window_numbers(&window), vec![8, 9, 10]);
        assert!(window.show_first);
        assert!(window.leading_ellipsis);
        assert!(!window.show_last);
        assert!(!window.trailing_ellipsis);
    }

    #[test]
    fn adjacent_boundary_pages_get_links_without_ellipses() {
        // start == 2: show the first-page link but no dots before page 2
        let window = page_window(4, 10);
        assert_eq!(window_numbers(&window), vec![2, 3, 4, 5, 6]);
        assert!(window.show_first);
        assert!(!window.leading_ellipsis);
        // end == 9: show the last-page link but no dots after page 9
        let window = page_window(7, 10);
        assert_eq!(window_numbers(&window), vec![5, 6, 7, 8, 9]);
        assert!(window.show_last);
        assert!(!window.trailing_ellipsis);
    }

    #[test]
    fn single_page_window_is_just_the_current_page() {
        let window = page_window(1, 1);
        assert_eq!(window_numbers(&window), vec![1]);
        assert!(!window.show_first);
        assert!(!window.show_last);
    }
}
