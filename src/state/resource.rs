//! ResourceState - Single-Object Fetch State
//!
//! Loading/error/data container for endpoints that return one object (or one list)
//! per request. Updates go through [`ResourceAction`]s; the store publishes every
//! change over a `watch` channel.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use super::request::{RequestToken, RequestTracker};
use crate::error::Result;

/// State of one fetched resource
#[derive(Debug)]
pub struct ResourceState<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<String>,
    latest: Option<RequestToken>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            latest: None,
        }
    }
}

impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            latest: self.latest,
        }
    }
}

/// Updates applied to a [`ResourceState`]
#[derive(Debug)]
pub enum ResourceAction<T> {
    /// A request went out
    Pending { token: RequestToken },
    /// A request succeeded
    Fulfilled { token: RequestToken, data: T },
    /// A request failed
    Rejected { token: RequestToken, message: String },
    /// Drop data and error
    Clear,
}

impl<T> ResourceState<T> {
    /// Apply an action. Returns `false` when it was discarded as stale.
    pub fn reduce(&mut self, action: ResourceAction<T>) -> bool {
        match action {
            ResourceAction::Pending { token } => {
                self.latest = Some(token);
                self.loading = true;
                self.error = None;
            }
            ResourceAction::Fulfilled { token, data } => {
                if self.latest != Some(token) {
                    tracing::debug!(token = token.id(), "Discarding stale response");
                    return false;
                }
                self.loading = false;
                self.data = Some(Arc::new(data));
            }
            ResourceAction::Rejected { token, message } => {
                if self.latest != Some(token) {
                    tracing::debug!(token = token.id(), "Discarding stale failure");
                    return false;
                }
                self.loading = false;
                self.error = Some(message);
            }
            ResourceAction::Clear => {
                self.data = None;
                self.error = None;
            }
        }
        true
    }
}

/// Owner of one [`ResourceState`]
pub struct ResourceStore<T> {
    name: Arc<str>,
    tracker: RequestTracker,
    state: watch::Sender<ResourceState<T>>,
    skip_while_loading: bool,
}

impl<T: Send + Sync + 'static> ResourceStore<T> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            name: name.into(),
            tracker: RequestTracker::new(),
            state,
            skip_while_loading: false,
        }
    }

    /// Ignore [`ResourceStore::load`] calls while a request is in flight
    pub fn skip_while_loading(mut self) -> Self {
        self.skip_while_loading = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Apply an action and notify subscribers if it changed anything
    pub fn dispatch(&self, action: ResourceAction<T>) -> bool {
        self.state.send_if_modified(|state| state.reduce(action))
    }

    pub fn clear(&self) {
        self.dispatch(ResourceAction::Clear);
    }

    /// Run `fetch` and record its outcome.
    ///
    /// Returns `true` if the outcome was applied, `false` if the load was skipped or
    /// superseded by a later one.
    pub async fn load<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = Result<T>>,
    {
        let token = self.tracker.issue();
        let skip = self.skip_while_loading;
        let started = self.state.send_if_modified(|state| {
            if skip && state.loading {
                return false;
            }
            state.reduce(ResourceAction::Pending { token })
        });
        if !started {
            tracing::debug!(resource = %self.name, "Load skipped, request already in flight");
            return false;
        }

        tracing::debug!(resource = %self.name, token = token.id(), "Loading");
        match fetch.await {
            Ok(data) => self.dispatch(ResourceAction::Fulfilled { token, data }),
            Err(e) => {
                tracing::warn!(resource = %self.name, error = %e, "Load failed");
                self.dispatch(ResourceAction::Rejected {
                    token,
                    message: e.to_string(),
                })
            }
        }
    }
}

impl<T> std::fmt::Debug for ResourceStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("name", &self.name)
            .field("skip_while_loading", &self.skip_while_loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tokio::sync::oneshot;

    fn not_found() -> Error {
        Error::Status {
            status: 404,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_load_success() {
        let store = ResourceStore::new("numbers");
        assert!(store.load(async { Ok(vec![1, 2, 3]) }).await);

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.data.as_deref(), Some(&vec![1, 2, 3]));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let store = ResourceStore::new("numbers");
        store.load(async { Ok(7) }).await;
        store.load(async { Err(not_found()) }).await;

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.data.as_deref(), Some(&7));
        assert_eq!(
            state.error.as_deref(),
            Some("Request failed with status code 404")
        );
    }

    #[tokio::test]
    async fn test_pending_clears_error() {
        let store = ResourceStore::new("numbers");
        store.load(async { Err::<i32, _>(not_found()) }).await;
        assert!(store.snapshot().error.is_some());

        store.load(async { Ok(1) }).await;
        assert!(store.snapshot().error.is_none());
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let tracker = RequestTracker::new();
        let mut state = ResourceState::default();

        let old = tracker.issue();
        state.reduce(ResourceAction::Pending { token: old });
        let new = tracker.issue();
        state.reduce(ResourceAction::Pending { token: new });

        assert!(state.reduce(ResourceAction::Fulfilled { token: new, data: "new" }));
        assert!(!state.reduce(ResourceAction::Fulfilled { token: old, data: "old" }));
        assert_eq!(state.data.as_deref(), Some(&"new"));
        assert!(!state.loading);
    }

    #[test]
    fn test_clear_drops_data_and_error() {
        let tracker = RequestTracker::new();
        let mut state = ResourceState::default();
        let token = tracker.issue();
        state.reduce(ResourceAction::Pending { token });
        state.reduce(ResourceAction::Fulfilled { token, data: 5 });
        state.error = Some("boom".to_string());

        state.reduce(ResourceAction::Clear);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_skip_while_loading() {
        let store = ResourceStore::new("detail").skip_while_loading();
        let (tx, rx) = oneshot::channel::<i32>();

        let first = store.load(async move { rx.await.map_err(|_| not_found()) });
        let second = async {
            tokio::task::yield_now().await;
            let started = store.load(async { Ok(2) }).await;
            tx.send(1).expect("send");
            started
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first);
        assert!(!second);
        assert_eq!(store.snapshot().data.as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = ResourceStore::new("numbers");
        let mut rx = store.subscribe();
        store.load(async { Ok(3) }).await;
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().data.as_deref(), Some(&3));
    }
}
