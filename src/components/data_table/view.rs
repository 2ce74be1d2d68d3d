//! Remote Table View
//!
//! One tokio task per bound server-paginated table. Interactions arrive as commands,
//! the search debounce deadline is a `select!` branch, and fetches are spawned
//! fire-and-forget. Each fetch reports back tagged with its request token so a
//! superseded response never overwrites a newer one.
//!
//! ```text
//! RemoteTableView ──Command──▶ worker ──spawn──▶ DataSource::fetch_page
//!        ▲                      │  ▲                      │
//!        └────watch snapshot────┘  └──────Completion──────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};

use super::column::Column;
use super::data_provider::{DataSource, Page, PageRequest};
use super::data_table::DataTable;
use super::pagination::Pagination;
use super::record::TableRecord;
use super::remote::RemoteTable;
use super::sort::SortState;
use crate::domain::DateRange;
use crate::error::{Error, Result};
use crate::helpers::Debouncer;
use crate::state::{PagedAction, PagedState, RequestToken, RequestTracker};

/// Everything a host needs to draw the table
#[derive(Debug)]
pub struct TableSnapshot<R: TableRecord> {
    pub state: PagedState<R>,
    /// Search box text as typed
    pub search_input: String,
    pub sort: SortState<R::Field>,
    pub current_page: u32,
    pub page_size: u32,
    pub range: Option<DateRange>,
    /// Commands the worker has processed so far
    pub handled: u64,
    /// A typed search term is still inside the debounce window
    pub search_pending: bool,
}

impl<R: TableRecord> Clone for TableSnapshot<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            search_input: self.search_input.clone(),
            sort: self.sort,
            current_page: self.current_page,
            page_size: self.page_size,
            range: self.range,
            handled: self.handled,
            search_pending: self.search_pending,
        }
    }
}

impl<R: TableRecord> TableSnapshot<R> {
    fn of(engine: &RemoteTable<R::Field>, state: &PagedState<R>) -> Self {
        Self {
            state: state.clone(),
            search_input: engine.search_input().to_string(),
            sort: *engine.sort(),
            current_page: engine.current_page(),
            page_size: engine.page_size(),
            range: engine.date_range(),
            handled: 0,
            search_pending: false,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.page_size, self.state.total)
    }

    /// Text rendering of the current page with its pagination footer
    pub fn render(&self, columns: &[Column<R>]) -> String {
        let rows = self.state.data.len();
        DataTable::new(columns)
            .rows(self.state.data.iter())
            .sorted_by(self.sort)
            .loading(self.state.loading)
            .error(self.state.error.as_deref())
            .footer(self.pagination().footer(rows))
            .render()
    }
}

/// Interactions to replay on a table, in the order a user would make them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInteractions {
    /// Typed into the search box
    pub search: Option<String>,
    /// Header clicks, by field wire name; clicking the same header twice flips direction
    pub sort: Vec<String>,
    pub page: Option<u32>,
}

impl TableInteractions {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.sort.is_empty() && self.page.is_none()
    }
}

enum Command<F> {
    SearchChanged(String),
    SortClicked(F),
    PageChanged(u32),
    DateRangeChanged(DateRange),
    Refresh,
    Clear,
}

struct Completion<R> {
    token: RequestToken,
    result: Result<Page<R>>,
}

/// Handle to a running remote table. Dropping it stops the worker and its timer.
pub struct RemoteTableView<R: TableRecord> {
    name: Arc<str>,
    commands: mpsc::UnboundedSender<Command<R::Field>>,
    /// Commands sent so far, compared against [`TableSnapshot::handled`]
    sent: AtomicU64,
    snapshot: watch::Receiver<TableSnapshot<R>>,
}

impl<R> RemoteTableView<R>
where
    R: TableRecord + Send + Sync + 'static,
{
    /// Start the worker. No request is issued until the first interaction.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(
        name: impl Into<Arc<str>>,
        engine: RemoteTable<R::Field>,
        source: Arc<S>,
        debounce: Duration,
    ) -> Self
    where
        S: DataSource<R>,
    {
        let name = name.into();
        let state = PagedState::new(engine.page_size());
        let (snapshot_tx, snapshot_rx) = watch::channel(TableSnapshot::of(&engine, &state));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let worker = Worker {
            name: name.clone(),
            engine,
            state,
            handled: 0,
            tracker: RequestTracker::new(),
            debounce: Debouncer::new(debounce),
            source,
            commands: command_rx,
            completion_tx,
            completions: completion_rx,
            snapshot: snapshot_tx,
        };

        tracing::debug!("Spawning remote table: {}", name);
        tokio::spawn(worker.run());

        Self {
            name,
            commands: command_tx,
            sent: AtomicU64::new(0),
            snapshot: snapshot_rx,
        }
    }

    fn send(&self, command: Command<R::Field>) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::ChannelClosed {
            message: format!("remote table {} stopped", self.name),
        })?;
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Keystroke in the search box; committed after the quiet window
    pub fn search_changed(&self, term: impl Into<String>) -> Result<()> {
        self.send(Command::SearchChanged(term.into()))
    }

    pub fn sort_clicked(&self, key: R::Field) -> Result<()> {
        self.send(Command::SortClicked(key))
    }

    pub fn page_changed(&self, page: u32) -> Result<()> {
        self.send(Command::PageChanged(page))
    }

    pub fn set_date_range(&self, range: DateRange) -> Result<()> {
        self.send(Command::DateRangeChanged(range))
    }

    /// Fetch the current page again
    pub fn refresh(&self) -> Result<()> {
        self.send(Command::Refresh)
    }

    /// Drop rows and error
    pub fn clear(&self) -> Result<()> {
        self.send(Command::Clear)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> TableSnapshot<R> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot<R>> {
        self.snapshot.clone()
    }

    /// Wait until every interaction sent so far has been handled, any typed search
    /// has been committed, and the outcome of the latest request has landed
    pub async fn settled(&self) -> Result<TableSnapshot<R>> {
        let sent = self.sent.load(Ordering::SeqCst);
        let mut rx = self.snapshot.clone();
        let snapshot = rx
            .wait_for(|s| s.handled >= sent && !s.search_pending && s.state.is_settled())
            .await
            .map_err(|_| Error::ChannelClosed {
                message: format!("remote table {} stopped", self.name),
            })?;
        Ok(snapshot.clone())
    }

    /// Type the search, click the headers, then jump to the page, and wait for the result.
    ///
    /// The search is settled before anything else so its commit does not reset the page
    /// chosen afterwards. Clicks naming no sortable column in `columns` are skipped. A
    /// date-scoped table must already have its range, or this never settles.
    pub async fn replay(
        &self,
        interactions: &TableInteractions,
        columns: &[Column<R>],
    ) -> Result<TableSnapshot<R>> {
        if let Some(term) = &interactions.search {
            self.search_changed(term.as_str())?;
            self.settled().await?;
        }
        for name in &interactions.sort {
            match columns.iter().find(|c| c.sortable && c.field_name() == name) {
                Some(column) => self.sort_clicked(column.key)?,
                None => tracing::debug!(table = %self.name, column = %name, "Not sortable here, skipping"),
            }
        }
        if let Some(page) = interactions.page {
            self.page_changed(page)?;
        }
        self.settled().await
    }
}

struct Worker<R: TableRecord, S> {
    name: Arc<str>,
    engine: RemoteTable<R::Field>,
    state: PagedState<R>,
    handled: u64,
    tracker: RequestTracker,
    debounce: Debouncer<String>,
    source: Arc<S>,
    commands: mpsc::UnboundedReceiver<Command<R::Field>>,
    completion_tx: mpsc::UnboundedSender<Completion<R>>,
    completions: mpsc::UnboundedReceiver<Completion<R>>,
    snapshot: watch::Sender<TableSnapshot<R>>,
}

impl<R, S> Worker<R, S>
where
    R: TableRecord + Send + Sync + 'static,
    S: DataSource<R>,
{
    async fn run(mut self) {
        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.complete(done),
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(term) = self.debounce.take_ready(Instant::now()) {
                        tracing::debug!(table = %self.name, search = %term, "Committing search");
                        let request = self.engine.commit_search(term);
                        self.issue(request);
                    }
                }
            }
        }
        tracing::debug!("Remote table stopped: {}", self.name);
    }

    fn handle(&mut self, command: Command<R::Field>) {
        self.handled += 1;
        match command {
            Command::SearchChanged(term) => {
                self.engine.on_search_input(term.clone());
                self.debounce.push(term, Instant::now());
                self.publish();
            }
            Command::SortClicked(key) => {
                let request = self.engine.on_sort_change(key);
                self.issue(request);
            }
            Command::PageChanged(page) => {
                let request = self.engine.on_page_change(page);
                self.issue(request);
            }
            Command::DateRangeChanged(range) => {
                let request = self.engine.set_date_range(range);
                self.issue(request);
            }
            Command::Refresh => {
                let request = self.engine.request();
                self.issue(request);
            }
            Command::Clear => {
                self.state.reduce(PagedAction::Clear);
                self.publish();
            }
        }
    }

    fn issue(&mut self, request: Option<PageRequest>) {
        let Some(request) = request else {
            tracing::debug!(table = %self.name, "Date range not set, skipping fetch");
            self.publish();
            return;
        };

        let token = self.tracker.issue();
        tracing::debug!(
            table = %self.name,
            token = token.id(),
            page = request.page,
            sort_by = ?request.sort_by,
            search = ?request.search,
            "Fetching page"
        );
        self.state.reduce(PagedAction::Pending { token });
        self.publish();

        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(request).await;
            let _ = tx.send(Completion { token, result });
        });
    }

    fn complete(&mut self, done: Completion<R>) {
        let Completion { token, result } = done;
        match result {
            Ok(page) => {
                let total = page.total;
                let applied = self.state.reduce(PagedAction::Fulfilled { token, page });
                if applied {
                    if let Some(request) = self.engine.reconcile_total(total) {
                        self.issue(Some(request));
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(table = %self.name, error = %e, "Fetch failed");
                self.state.reduce(PagedAction::Rejected {
                    token,
                    message: e.to_string(),
                });
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshot.send_replace(TableSnapshot {
            handled: self.handled,
            search_pending: self.debounce.is_pending(),
            ..TableSnapshot::of(&self.engine, &self.state)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::data_table::{DateScope, SortDirection, SortPagePolicy, sortable_field_names};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Lane {
        origin: String,
        score: f64,
    }

    crate::table_record! {
        Lane => LaneField {
            Origin = "origin" => origin,
            Score = "score" => score,
        }
    }

    const WINDOW: Duration = Duration::from_millis(1000);

    /// Records every request and answers from a script
    struct FakeSource {
        requests: Mutex<Vec<PageRequest>>,
        total: u64,
        fail_with: Option<u16>,
        /// Calls answered normally before `fail_with` kicks in
        fail_after: usize,
        delays: Mutex<Vec<Duration>>,
    }

    impl FakeSource {
        fn new(total: u64) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                total,
                fail_with: None,
                fail_after: 0,
                delays: Mutex::new(Vec::new()),
            }
        }

        fn failing_after(calls: usize, status: u16, total: u64) -> Self {
            Self {
                fail_with: Some(status),
                fail_after: calls,
                ..Self::new(total)
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl DataSource<Lane> for FakeSource {
        async fn fetch_page(&self, request: PageRequest) -> Result<Page<Lane>> {
            let delay = {
                let mut delays = self.delays.lock().expect("lock");
                if delays.is_empty() { Duration::ZERO } else { delays.remove(0) }
            };
            let call = {
                let mut requests = self.requests.lock().expect("lock");
                requests.push(request.clone());
                requests.len() - 1
            };
            time::sleep(delay).await;

            if let Some(status) = self.fail_with.filter(|_| call >= self.fail_after) {
                return Err(Error::Status {
                    status,
                    message: None,
                });
            }
            Ok(Page {
                data: vec![Lane {
                    origin: format!("page-{}", request.page),
                    score: f64::from(request.page),
                }],
                page: request.page,
                page_size: request.page_size,
                total: self.total,
            })
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2025-01-01", "2025-12-31").expect("range")
    }

    fn engine(scope: DateScope) -> RemoteTable<LaneField> {
        RemoteTable::new(10, SortPagePolicy::KeepCurrent, scope)
            .with_default_sort(LaneField::Score, SortDirection::Desc)
    }

    async fn settle(view: &RemoteTableView<Lane>) -> TableSnapshot<Lane> {
        view.settled().await.expect("worker alive")
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_last_term_once() {
        let source = Arc::new(FakeSource::new(5));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        for term in ["a", "au", "aus"] {
            view.search_changed(term).expect("send");
            time::sleep(Duration::from_millis(300)).await;
        }
        assert_eq!(view.snapshot().search_input, "aus");
        assert!(source.requests().is_empty());

        time::sleep(WINDOW).await;
        settle(&view).await;

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].search.as_deref(), Some("aus"));
        assert_eq!(requests[0].page, 1);
        assert_eq!(requests[0].sort_by, Some("score"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_keystrokes_commit_each() {
        let source = Arc::new(FakeSource::new(5));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.search_changed("den").expect("send");
        time::sleep(Duration::from_millis(1500)).await;
        view.search_changed("denver").expect("send");
        time::sleep(Duration::from_millis(1500)).await;

        let searches: Vec<_> = source.requests().into_iter().map(|r| r.search).collect();
        assert_eq!(
            searches,
            vec![Some("den".to_string()), Some("denver".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_date_range_skips_fetch() {
        let source = Arc::new(FakeSource::new(5));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::Required), source.clone(), WINDOW);

        view.refresh().expect("send");
        view.page_changed(2).expect("send");
        view.sort_clicked(LaneField::Origin).expect("send");
        time::sleep(Duration::from_secs(5)).await;
        assert!(source.requests().is_empty());
        assert!(!view.snapshot().state.loading);

        view.set_date_range(range()).expect("send");
        time::sleep(Duration::from_millis(10)).await;
        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].range, Some(range()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let source = Arc::new(FakeSource::new(50));
        source
            .delays
            .lock()
            .expect("lock")
            .extend([Duration::from_millis(500), Duration::from_millis(10)]);
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.page_changed(2).expect("send");
        time::sleep(Duration::from_millis(1)).await;
        view.page_changed(3).expect("send");
        time::sleep(Duration::from_secs(1)).await;

        let snapshot = view.snapshot();
        assert_eq!(source.requests().len(), 2);
        assert_eq!(snapshot.state.page, 3);
        assert_eq!(snapshot.state.data[0].origin, "page-3");
        assert!(!snapshot.state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_page_is_clamped_and_refetched() {
        let source = Arc::new(FakeSource::new(12));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.page_changed(5).expect("send");
        time::sleep(Duration::from_millis(50)).await;
        let snapshot = settle(&view).await;

        let pages: Vec<_> = source.requests().into_iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![5, 2]);
        assert_eq!(snapshot.current_page, 2);
        assert_eq!(snapshot.state.data[0].origin, "page-2");
        assert_eq!(snapshot.pagination().summary(1), "Showing 11 to 12 of 12 results");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_rows() {
        let source = Arc::new(FakeSource::failing_after(1, 404, 3));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.refresh().expect("send");
        time::sleep(Duration::from_millis(10)).await;
        let before = settle(&view).await;
        assert_eq!(before.state.data.len(), 1);
        assert!(before.state.error.is_none());

        view.page_changed(2).expect("send");
        time::sleep(Duration::from_millis(10)).await;
        let after = settle(&view).await;
        assert_eq!(
            after.state.error.as_deref(),
            Some("Request failed with status code 404")
        );
        assert_eq!(after.state.data[0].origin, "page-1");
        assert!(!after.state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_drops_rows() {
        let source = Arc::new(FakeSource::new(3));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source, WINDOW);
        view.refresh().expect("send");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(view.snapshot().state.data.len(), 1);

        view.clear().expect("send");
        time::sleep(Duration::from_millis(1)).await;
        assert!(view.snapshot().state.data.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sort_click_fetches_immediately() {
        let source = Arc::new(FakeSource::new(30));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.page_changed(3).expect("send");
        view.sort_clicked(LaneField::Score).expect("send");
        time::sleep(Duration::from_millis(1)).await;

        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].sort_order, Some(SortDirection::Asc));
        assert_eq!(requests[1].page, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_waits_for_queued_interactions() {
        let source = Arc::new(FakeSource::new(95));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);
        view.refresh().expect("send");
        assert_eq!(settle(&view).await.current_page, 1);

        // The previous outcome has landed, but the page change has not been handled yet
        view.page_changed(4).expect("send");
        let snapshot = settle(&view).await;
        assert_eq!(snapshot.current_page, 4);
        assert_eq!(snapshot.state.data[0].origin, "page-4");

        view.search_changed("aus").expect("send");
        let snapshot = settle(&view).await;
        assert!(!snapshot.search_pending);
        assert_eq!(source.requests().last().and_then(|r| r.search.clone()).as_deref(), Some("aus"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_searches_then_sorts_then_pages() {
        let source = Arc::new(FakeSource::new(95));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);
        let columns = vec![
            Column::new(LaneField::Origin, "Origin").sortable(),
            Column::new(LaneField::Score, "Score"),
        ];
        assert_eq!(sortable_field_names(&columns), vec!["origin"]);

        let interactions = TableInteractions {
            search: Some("den".to_string()),
            sort: vec!["origin".to_string(), "origin".to_string(), "score".to_string()],
            page: Some(3),
        };
        let snapshot = view.replay(&interactions, &columns).await.expect("replay");

        let last = source.requests().pop().expect("request");
        assert_eq!(last.page, 3);
        assert_eq!(last.search.as_deref(), Some("den"));
        assert_eq!(last.sort_by, Some("origin"));
        assert_eq!(last.sort_order, Some(SortDirection::Desc));
        assert_eq!(snapshot.sort.key(), Some(LaneField::Origin));
        assert_eq!(snapshot.state.data[0].origin, "page-3");
        assert!(snapshot.render(&columns).contains("Page 3 of 10  < Prev  Next >"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_pending_search() {
        let source = Arc::new(FakeSource::new(5));
        let view = RemoteTableView::spawn("lanes", engine(DateScope::NotUsed), source.clone(), WINDOW);

        view.search_changed("aus").expect("send");
        drop(view);
        time::sleep(WINDOW * 3).await;
        assert!(source.requests().is_empty());
    }
}
