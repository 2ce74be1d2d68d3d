//! Status Poller
//!
//! Watches the backend's recalculation flag. One check on spawn, then one per
//! interval for as long as the backend reports it is calculating.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::api::ApiClient;
use crate::domain::system::SystemStatus;
use crate::error::Result;
use crate::state::SystemState;

/// Trait for anything that can report the recalculation status
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<SystemStatus>> + Send;
}

impl StatusSource for ApiClient {
    async fn fetch_status(&self) -> Result<SystemStatus> {
        self.system_status().await
    }
}

/// Handle to a running poller. Dropping it stops the polling.
pub struct StatusPoller {
    state: watch::Receiver<SystemState>,
    task: JoinHandle<()>,
}

impl StatusPoller {
    /// Must be called from within a tokio runtime
    pub fn spawn<S: StatusSource>(source: Arc<S>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(SystemState::default());
        let task = tokio::spawn(poll(source, interval, tx));
        Self { state: rx, task }
    }

    pub fn state(&self) -> SystemState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SystemState> {
        self.state.clone()
    }

    /// False once the backend reported it is done calculating
    pub fn is_polling(&self) -> bool {
        !self.task.is_finished()
    }

    /// Wait until polling has stopped
    pub async fn settled(&mut self) -> SystemState {
        // The sender is dropped when the task ends
        while self.state.changed().await.is_ok() {}
        self.state.borrow().clone()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll<S: StatusSource>(source: Arc<S>, interval: Duration, tx: watch::Sender<SystemState>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately
        ticker.tick().await;

        match source.fetch_status().await {
            Ok(status) => {
                tx.send_modify(|state| state.update(status));
            }
            Err(e) => {
                // Keep the last known state; a failed first check counts as idle
                tracing::warn!("System status check failed: {}", e);
            }
        }

        if !tx.borrow().is_calculating {
            tracing::debug!("System idle, status polling stopped");
            return;
        }
        tracing::info!("System recalculating, next check in {:?}", interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::Overlay;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Replays scripted statuses and records when each check happened
    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<SystemStatus>>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<SystemStatus>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.lock().expect("lock").len()
        }
    }

    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self) -> Result<SystemStatus> {
            self.calls.lock().expect("lock").push(Instant::now());
            self.replies
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Ok(status(false, None)))
        }
    }

    fn status(calculating: bool, error: Option<&str>) -> SystemStatus {
        SystemStatus {
            is_calculating: calculating,
            last_calculated_at: Some("2025-06-01T00:00:00".to_string()),
            error_message: error.map(String::from),
        }
    }

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_idle_backend_is_checked_once() {
        let source = ScriptedSource::new(vec![Ok(status(false, None))]);
        let mut poller = StatusPoller::spawn(source.clone(), MINUTE);

        let state = poller.settled().await;
        assert!(!state.is_calculating);
        assert_eq!(state.overlay(), None);

        tokio::time::sleep(MINUTE * 5).await;
        assert_eq!(source.calls(), 1);
        assert!(!poller.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_interval_while_calculating() {
        let source = ScriptedSource::new(vec![
            Ok(status(true, None)),
            Ok(status(true, None)),
            Ok(status(false, None)),
        ]);
        let start = Instant::now();
        let poller = StatusPoller::spawn(source.clone(), MINUTE);
        let mut rx = poller.subscribe();

        rx.wait_for(|s| s.is_calculating).await.expect("calculating");
        assert_eq!(poller.state().overlay(), Some(Overlay::Calculating));

        tokio::time::sleep(MINUTE * 3).await;
        let calls = source.calls.lock().expect("lock").clone();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1] - start, MINUTE);
        assert_eq!(calls[2] - start, MINUTE * 2);
        assert!(!poller.state().is_calculating);
        assert!(!poller.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_calculation_shows_error() {
        let source = ScriptedSource::new(vec![
            Ok(status(true, None)),
            Ok(status(false, Some("Materialized view refresh failed"))),
        ]);
        let mut poller = StatusPoller::spawn(source, MINUTE);

        let state = poller.settled().await;
        let overlay = state.overlay().expect("overlay");
        assert_eq!(overlay.title(), "Update Failed");
        assert_eq!(overlay.message(), "Materialized view refresh failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_check_keeps_polling_while_calculating() {
        let source = ScriptedSource::new(vec![
            Ok(status(true, None)),
            Err(Error::Status {
                status: 500,
                message: None,
            }),
            Ok(status(false, None)),
        ]);
        let mut poller = StatusPoller::spawn(source.clone(), MINUTE);

        let state = poller.settled().await;
        assert!(!state.is_calculating);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let source = ScriptedSource::new((0..10).map(|_| Ok(status(true, None))).collect());
        let poller = StatusPoller::spawn(source.clone(), MINUTE);
        let mut rx = poller.subscribe();
        rx.wait_for(|s| s.is_calculating).await.expect("calculating");

        drop(poller);
        tokio::time::sleep(MINUTE * 5).await;
        assert_eq!(source.calls(), 1);
    }
}
