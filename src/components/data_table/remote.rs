//! Remote Table Engine
//!
//! Translates page, sort and search interactions on a server-paginated table into
//! [`PageRequest`]s. It owns no rows; the server decides what a page contains.

use super::data_provider::PageRequest;
use super::pagination::last_valid_page;
use super::record::FieldKey;
use super::sort::{SortDirection, SortState};
use crate::domain::DateRange;

/// What a sort change does to the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPagePolicy {
    /// Go back to page 1
    ResetToFirst,
    /// Stay on the current page
    KeepCurrent,
}

/// Whether the endpoint is scoped by a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// `start` and `end` must be set before any request is issued
    Required,
    /// The endpoint takes no date range
    NotUsed,
}

/// Request state of one server-paginated table
#[derive(Debug, Clone)]
pub struct RemoteTable<F> {
    page_size: u32,
    current_page: u32,
    sort: SortState<F>,
    sort_policy: SortPagePolicy,
    scope: DateScope,
    range: Option<DateRange>,
    /// Raw text as typed, shown in the search box
    search_input: String,
    /// Last term that made it through the debounce window
    committed_search: String,
}

impl<F: FieldKey> RemoteTable<F> {
    /// Create an engine on page 1 with no sort.
    ///
    /// Page sizes below 1 are raised to 1.
    pub fn new(page_size: u32, sort_policy: SortPagePolicy, scope: DateScope) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            sort: SortState::none(),
            sort_policy,
            scope,
            range: None,
            search_input: String::new(),
            committed_search: String::new(),
        }
    }

    /// Start sorted by `key`
    pub fn with_default_sort(mut self, key: F, direction: SortDirection) -> Self {
        self.sort = SortState::by(key, direction);
        self
    }

    /// Start with a date range already selected
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    // ==================== Getters ====================

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn sort(&self) -> &SortState<F> {
        &self.sort
    }

    pub fn sort_policy(&self) -> SortPagePolicy {
        self.sort_policy
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn committed_search(&self) -> &str {
        &self.committed_search
    }

    // ==================== Interactions ====================

    /// Store the raw search text; nothing is requested until it is committed
    pub fn on_search_input(&mut self, term: impl Into<String>) {
        self.search_input = term.into();
    }

    /// Commit a debounced search term: back to page 1, current sort kept
    pub fn commit_search(&mut self, term: impl Into<String>) -> Option<PageRequest> {
        self.committed_search = term.into();
        self.current_page = 1;
        self.request()
    }

    /// Toggle sort on `key`; the page follows the view's policy
    pub fn on_sort_change(&mut self, key: F) -> Option<PageRequest> {
        self.sort.toggle(key);
        if self.sort_policy == SortPagePolicy::ResetToFirst {
            self.current_page = 1;
        }
        self.request()
    }

    /// Jump to `page`, keeping sort and search.
    ///
    /// The page is not checked against the last known total; an out-of-range page is
    /// corrected by [`RemoteTable::reconcile_total`] once the server answers.
    pub fn on_page_change(&mut self, page: u32) -> Option<PageRequest> {
        self.current_page = page.max(1);
        self.request()
    }

    /// Select a new date range and go back to page 1
    pub fn set_date_range(&mut self, range: DateRange) -> Option<PageRequest> {
        self.range = Some(range);
        self.current_page = 1;
        self.request()
    }

    /// Request for the current parameters, or `None` while the date range is missing
    pub fn request(&self) -> Option<PageRequest> {
        if self.scope == DateScope::Required && self.range.is_none() {
            return None;
        }

        let search = if self.committed_search.is_empty() {
            None
        } else {
            Some(self.committed_search.clone())
        };

        Some(PageRequest {
            page: self.current_page,
            page_size: self.page_size,
            sort_by: self.sort.key().map(|k| k.name()),
            sort_order: self.sort.key().map(|_| self.sort.direction()),
            search,
            range: match self.scope {
                DateScope::Required => self.range,
                DateScope::NotUsed => None,
            },
        })
    }

    /// Clamp the current page after the server reported `total` rows.
    ///
    /// Returns a request for the last valid page when the current one no longer exists.
    pub fn reconcile_total(&mut self, total: u64) -> Option<PageRequest> {
        let last = last_valid_page(total, self.page_size);
        if self.current_page > last {
            tracing::debug!(from = self.current_page, to = last, total, "Clamping page");
            self.current_page = last;
            return self.request();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Score,
        Name,
    }

    impl FieldKey for Key {
        fn name(&self) -> &'static str {
            match self {
                Key::Score => "score",
                Key::Name => "name",
            }
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2025-01-01", "2025-12-31").expect("range")
    }

    fn engine(policy: SortPagePolicy) -> RemoteTable<Key> {
        RemoteTable::new(10, policy, DateScope::Required)
            .with_default_sort(Key::Score, SortDirection::Desc)
            .with_date_range(range())
    }

    #[test]
    fn test_no_request_without_date_range() {
        let mut table: RemoteTable<Key> =
            RemoteTable::new(10, SortPagePolicy::KeepCurrent, DateScope::Required);
        assert!(table.request().is_none());
        assert!(table.on_page_change(2).is_none());
        assert!(table.commit_search("x").is_none());
        assert!(table.set_date_range(range()).is_some());
    }

    #[test]
    fn test_unscoped_endpoint_never_sends_range() {
        let table: RemoteTable<Key> =
            RemoteTable::new(10, SortPagePolicy::KeepCurrent, DateScope::NotUsed).with_date_range(range());
        let request = table.request().expect("request");
        assert!(request.range.is_none());
    }

    #[test]
    fn test_default_sort_in_request() {
        let request = engine(SortPagePolicy::KeepCurrent).request().expect("request");
        assert_eq!(request.sort_by, Some("score"));
        assert_eq!(request.sort_order, Some(SortDirection::Desc));
        assert_eq!(request.page, 1);
        assert_eq!(request.search, None);
    }

    #[test]
    fn test_sort_toggle_rules() {
        let mut table = engine(SortPagePolicy::KeepCurrent);
        let request = table.on_sort_change(Key::Score).expect("request");
        assert_eq!(request.sort_order, Some(SortDirection::Asc));

        let request = table.on_sort_change(Key::Name).expect("request");
        assert_eq!(request.sort_by, Some("name"));
        assert_eq!(request.sort_order, Some(SortDirection::Asc));
    }

    #[test]
    fn test_sort_page_policies() {
        let mut keep = engine(SortPagePolicy::KeepCurrent);
        keep.on_page_change(3);
        assert_eq!(keep.on_sort_change(Key::Name).expect("request").page, 3);

        let mut reset = engine(SortPagePolicy::ResetToFirst);
        reset.on_page_change(3);
        assert_eq!(reset.on_sort_change(Key::Name).expect("request").page, 1);
    }

    #[test]
    fn test_commit_search_resets_page_and_keeps_sort() {
        let mut table = engine(SortPagePolicy::KeepCurrent);
        table.on_page_change(4);
        table.on_search_input("aus");
        assert_eq!(table.search_input(), "aus");
        assert_eq!(table.committed_search(), "");

        let request = table.commit_search("austin").expect("request");
        assert_eq!(request.page, 1);
        assert_eq!(request.search.as_deref(), Some("austin"));
        assert_eq!(request.sort_by, Some("score"));
    }

    #[test]
    fn test_empty_search_is_not_sent() {
        let mut table = engine(SortPagePolicy::KeepCurrent);
        table.commit_search("austin");
        let request = table.commit_search("").expect("request");
        assert_eq!(request.search, None);
    }

    #[test]
    fn test_page_change_keeps_sort_and_search() {
        let mut table = engine(SortPagePolicy::KeepCurrent);
        table.commit_search("den");
        let request = table.on_page_change(2).expect("request");
        assert_eq!(request.page, 2);
        assert_eq!(request.search.as_deref(), Some("den"));
        assert_eq!(request.sort_by, Some("score"));
    }

    #[test]
    fn test_reconcile_clamps_to_last_page() {
        let mut table = engine(SortPagePolicy::KeepCurrent);
        table.on_page_change(5);
        assert!(table.reconcile_total(42).is_none());
        assert_eq!(table.current_page(), 5);

        let request = table.reconcile_total(12).expect("refetch");
        assert_eq!(request.page, 2);
        assert_eq!(table.current_page(), 2);

        let request = table.reconcile_total(0).expect("refetch");
        assert_eq!(request.page, 1);
        assert!(table.reconcile_total(0).is_none());
    }
}
