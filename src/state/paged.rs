//! PagedState - Server-Paginated Fetch State

use std::sync::Arc;

use super::request::RequestToken;
use crate::components::data_table::Page;

/// State of one server-paginated record set
#[derive(Debug)]
pub struct PagedState<R> {
    /// Rows of the last applied page
    pub data: Arc<Vec<R>>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
    latest: Option<RequestToken>,
}

impl<R> PagedState<R> {
    pub fn new(page_size: u32) -> Self {
        Self {
            data: Arc::new(Vec::new()),
            page: 1,
            page_size,
            total: 0,
            loading: false,
            error: None,
            latest: None,
        }
    }

    /// A request went out and its outcome has landed
    pub fn is_settled(&self) -> bool {
        self.latest.is_some() && !self.loading
    }
}

impl<R> Clone for PagedState<R> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            loading: self.loading,
            error: self.error.clone(),
            latest: self.latest,
        }
    }
}

/// Updates applied to a [`PagedState`]
#[derive(Debug)]
pub enum PagedAction<R> {
    Pending { token: RequestToken },
    Fulfilled { token: RequestToken, page: Page<R> },
    Rejected { token: RequestToken, message: String },
    Clear,
}

impl<R> PagedState<R> {
    /// Apply an action. Returns `false` when it was discarded as stale.
    pub fn reduce(&mut self, action: PagedAction<R>) -> bool {
        match action {
            PagedAction::Pending { token } => {
                self.latest = Some(token);
                self.loading = true;
                self.error = None;
            }
            PagedAction::Fulfilled { token, page } => {
                if self.latest != Some(token) {
                    tracing::debug!(token = token.id(), "Discarding stale page");
                    return false;
                }
                self.data = Arc::new(page.data);
                self.page = page.page;
                self.page_size = page.page_size;
                self.total = page.total;
                self.loading = false;
            }
            PagedAction::Rejected { token, message } => {
                if self.latest != Some(token) {
                    tracing::debug!(token = token.id(), "Discarding stale failure");
                    return false;
                }
                self.error = Some(message);
                self.loading = false;
            }
            PagedAction::Clear => {
                self.data = Arc::new(Vec::new());
                self.error = None;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RequestTracker;

    fn page(rows: Vec<&'static str>, page: u32, total: u64) -> Page<&'static str> {
        Page {
            data: rows,
            page,
            page_size: 10,
            total,
        }
    }

    #[test]
    fn test_fulfilled_replaces_everything() {
        let tracker = RequestTracker::new();
        let mut state = PagedState::new(10);
        let token = tracker.issue();
        state.reduce(PagedAction::Pending { token });
        assert!(state.loading);

        state.reduce(PagedAction::Fulfilled {
            token,
            page: page(vec!["a", "b"], 3, 22),
        });
        assert!(!state.loading);
        assert_eq!(*state.data, vec!["a", "b"]);
        assert_eq!(state.page, 3);
        assert_eq!(state.total, 22);
    }

    #[test]
    fn test_rejected_keeps_rows() {
        let tracker = RequestTracker::new();
        let mut state = PagedState::new(10);
        let token = tracker.issue();
        state.reduce(PagedAction::Pending { token });
        state.reduce(PagedAction::Fulfilled {
            token,
            page: page(vec!["a"], 1, 1),
        });

        let token = tracker.issue();
        state.reduce(PagedAction::Pending { token });
        state.reduce(PagedAction::Rejected {
            token,
            message: "Network Error".to_string(),
        });
        assert!(!state.loading);
        assert_eq!(*state.data, vec!["a"]);
        assert_eq!(state.error.as_deref(), Some("Network Error"));
    }

    #[test]
    fn test_out_of_order_pages() {
        let tracker = RequestTracker::new();
        let mut state = PagedState::new(10);
        let slow = tracker.issue();
        state.reduce(PagedAction::Pending { token: slow });
        let fast = tracker.issue();
        state.reduce(PagedAction::Pending { token: fast });

        assert!(state.reduce(PagedAction::Fulfilled {
            token: fast,
            page: page(vec!["fresh"], 2, 30),
        }));
        assert!(!state.reduce(PagedAction::Fulfilled {
            token: slow,
            page: page(vec!["stale"], 1, 30),
        }));
        assert_eq!(*state.data, vec!["fresh"]);
        assert_eq!(state.page, 2);
    }
}
