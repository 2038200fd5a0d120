//! Offset pagination state.

/// Tracks progress through a paged search.
///
/// Stops when the records fetched so far reach the reported total, or when
/// a page comes back empty. The offset advances by the records actually
/// returned, so a short page never skips results.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    fetched: usize,
    reported_total: Option<usize>,
    last_page_len: Option<usize>,
    requests: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            fetched: 0,
            reported_total: None,
            last_page_len: None,
            requests: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Offset for the next request, or `None` once paging is complete.
    pub fn next_offset(&self) -> Option<usize> {
        if self.is_done() {
            None
        } else {
            Some(self.fetched)
        }
    }

    /// Record one response page.
    pub fn record_page(&mut self, records_in_page: usize, reported_total: usize) {
        self.requests += 1;
        self.fetched += records_in_page;
        self.reported_total = Some(reported_total);
        self.last_page_len = Some(records_in_page);
    }

    pub fn is_done(&self) -> bool {
        let exhausted = matches!(self.reported_total, Some(total) if self.fetched >= total);
        let empty_page = self.last_page_len == Some(0);
        exhausted || empty_page
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }

    pub fn requests(&self) -> usize {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(page_size: usize, pages: &[usize], total: usize) -> (usize, usize) {
        let mut pager = Pager::new(page_size);
        let mut pages = pages.iter();
        while pager.next_offset().is_some() {
            let n = *pages.next().expect("pager asked for more pages than scripted");
            pager.record_page(n, total);
        }
        (pager.requests(), pager.fetched())
    }

    #[test]
    fn test_three_pages_for_647() {
        assert_eq!(drive(300, &[300, 300, 47], 647), (3, 647));
    }

    #[test]
    fn test_exact_multiple_stops_without_extra_request() {
        assert_eq!(drive(300, &[300, 300], 600), (2, 600));
    }

    #[test]
    fn test_empty_result_is_one_request() {
        assert_eq!(drive(300, &[0], 0), (1, 0));
    }

    #[test]
    fn test_empty_page_stops_even_if_total_says_more() {
        assert_eq!(drive(300, &[300, 0], 1000), (2, 300));
    }

    #[test]
    fn test_short_page_advances_offset_by_returned_count() {
        let mut pager = Pager::new(300);
        pager.record_page(250, 600);
        assert_eq!(pager.next_offset(), Some(250));
    }

    #[test]
    fn test_first_offset_is_zero() {
        assert_eq!(Pager::new(300).next_offset(), Some(0));
    }
}
