//! Pagination
//!
//! Page arithmetic for server-paginated tables. The server decides which rows belong to
//! a page; this only derives page counts and the "Showing X to Y of Z" window.

/// Number of pages for `total` rows: `ceil(total / page_size)`
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Last page a view may show: `max(1, total_pages)`
pub fn last_valid_page(total: u64, page_size: u32) -> u32 {
    total_pages(total, page_size).max(1)
}

/// Pagination metadata for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based current page
    pub current_page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Total rows reported by the server
    pub total: u64,
}

impl Pagination {
    /// Create pagination metadata
    pub fn new(current_page: u32, page_size: u32, total: u64) -> Self {
        Self {
            current_page,
            page_size,
            total,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// 1-based inclusive row window shown on the current page, given the rows received
    pub fn showing(&self, rows_on_page: usize) -> (u64, u64) {
        let page = u64::from(self.current_page.max(1));
        let size = u64::from(self.page_size);
        let from = if rows_on_page > 0 { (page - 1) * size + 1 } else { 0 };
        let to = (page * size).min(self.total);
        (from, to)
    }

    /// Footer line for the table
    pub fn summary(&self, rows_on_page: usize) -> String {
        let (from, to) = self.showing(rows_on_page);
        format!("Showing {} to {} of {} results", from, to, self.total)
    }

    /// Summary followed by the page position and the moves available from it
    pub fn footer(&self, rows_on_page: usize) -> String {
        let mut out = format!(
            "{}  Page {} of {}",
            self.summary(rows_on_page),
            self.current_page.max(1),
            self.total_pages().max(1)
        );
        if self.can_prev() {
            out.push_str("  < Prev");
        }
        if self.can_next() {
            out.push_str("  Next >");
        }
        out
    }
}
