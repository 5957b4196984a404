use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{error, info};

use super::transactions::{fetch, Fetched};
use crate::{
    error::Error,
    model::Transaction,
    provider::EventSource,
    types::Filter,
};

/// Result of the latest successful poll.
#[derive(Debug, Clone)]
pub struct LiveData {
    pub transactions: Vec<Transaction>,
    pub skipped: usize,
    pub updated_at: DateTime<Utc>,
    /// Error of the most recent poll, if it failed after this data was
    /// stored.
    pub last_error: Option<String>,
}

/// Shared between the poller (single writer) and request handlers.
#[derive(Debug, Default)]
pub struct LiveState {
    data: RwLock<Option<LiveData>>,
}

impl LiveState {
    /// `None` until the first poll succeeds.
    pub async fn latest(&self) -> Option<LiveData> {
        self.data.read().await.clone()
    }

    pub async fn store(&self, fetched: Fetched) {
        let data = LiveData {
            transactions: fetched.transactions,
            skipped: fetched.skipped,
            updated_at: Utc::now(),
            last_error: None,
        };
        *self.data.write().await = Some(data);
    }

    pub async fn record_failure(&self, e: &Error) {
        if let Some(data) = self.data.write().await.as_mut() {
            data.last_error = Some(e.to_string());
        }
    }
}

pub struct LivePoller;

impl LivePoller {
    /// Poll `source` every `interval`, first poll immediately. Cycles never
    /// overlap; a slow cycle delays the next tick.
    pub fn spawn(
        source: Arc<dyn EventSource>,
        filter: Filter,
        interval: Duration,
        state: Arc<LiveState>,
    ) -> LivePollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!("Live poller started, interval {:?}", interval);
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        poll_once(source.as_ref(), &filter, &state).await;
                    },
                }
            }

            info!("Live poller stopped");
        });

        LivePollerHandle {
            stop: stop_tx,
            task: Some(task),
        }
    }
}

pub async fn poll_once(source: &dyn EventSource, filter: &Filter, state: &LiveState) {
    match fetch(source, filter).await {
        Ok(fetched) => state.store(fetched).await,
        Err(e) => {
            error!("Live poll failed: {}", e);
            state.record_failure(&e).await;
        },
    }
}

/// Stops the poller on [`LivePollerHandle::stop`]; dropping it aborts the
/// task.
#[derive(Debug)]
pub struct LivePollerHandle {
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl LivePollerHandle {
    pub async fn stop(mut self) -> Result<(), Error> {
        if self.stop.send(true).is_err() {
            return Err(Error::TaskError(String::from(
                "live poller already finished",
            )));
        }
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl Drop for LivePollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::transactions::tests::{event, filter, FakeSource},
        types::RawEvent,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TICK: Duration = Duration::from_millis(20);

    async fn wait_for<F>(state: &LiveState, check: F) -> LiveData
    where
        F: Fn(&LiveData) -> bool,
    {
        for _ in 0..100 {
            if let Some(data) = state.latest().await {
                if check(&data) {
                    return data;
                }
            }
            time::sleep(TICK).await;
        }
        panic!("live state never reached the expected value");
    }

    #[tokio::test]
    async fn stores_sorted_transactions() {
        let source = Arc::new(FakeSource::new(vec![Ok(vec![
            event("old", "inbound-transaction-ok", 1_000, 10),
            event("new", "outbound-transaction-ok", 2_000, 20),
        ])]));
        let state = Arc::new(LiveState::default());

        assert!(state.latest().await.is_none());

        let handle = LivePoller::spawn(source.clone(), filter(), TICK, state.clone());
        let data = wait_for(&state, |_| true).await;

        assert_eq!(data.transactions[0].id, "new");
        assert!(data.last_error.is_none());
        handle.stop().await.unwrap();
    }

    #[tokio::test]
    async fn failed_poll_keeps_previous_data() {
        let source = Arc::new(FakeSource::new(vec![
            Ok(vec![event("a", "inbound-transaction-ok", 1_000, 10)]),
            Err(String::from("relay down")),
        ]));
        let state = Arc::new(LiveState::default());

        let handle = LivePoller::spawn(source, filter(), TICK, state.clone());
        let data = wait_for(&state, |data| data.last_error.is_some()).await;

        assert_eq!(data.transactions.len(), 1);
        assert!(data.last_error.unwrap().contains("relay down"));
        handle.stop().await.unwrap();
    }

    /// Source whose fetches take several ticks, tracking overlap.
    #[derive(Debug, Default)]
    struct SlowSource {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventSource for SlowSource {
        async fn fetch_events(&self, _filter: &Filter) -> Result<Vec<RawEvent>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(running, Ordering::SeqCst);
            time::sleep(TICK * 3).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn slow_fetches_never_overlap_or_burst() {
        let source = Arc::new(SlowSource::default());
        let state = Arc::new(LiveState::default());

        let handle = LivePoller::spawn(source.clone(), filter(), TICK, state.clone());
        time::sleep(TICK * 20).await;
        handle.stop().await.unwrap();

        let calls = source.calls.load(Ordering::SeqCst);
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(calls >= 2, "only {} fetches ran", calls);
        // each fetch takes three ticks, so at most one start per three ticks
        assert!(calls <= 8, "{} fetches in twenty ticks", calls);
    }

    #[tokio::test]
    async fn failure_before_first_success_leaves_state_empty() {
        let source = FakeSource::new(vec![Err(String::from("relay down"))]);
        let state = LiveState::default();

        poll_once(&source, &filter(), &state).await;

        assert!(state.latest().await.is_none());
    }

    #[tokio::test]
    async fn stop_ends_polling() {
        let source = Arc::new(FakeSource::new(vec![Ok(vec![])]));
        let state = Arc::new(LiveState::default());

        let handle = LivePoller::spawn(source.clone(), filter(), TICK, state.clone());
        wait_for(&state, |_| true).await;
        handle.stop().await.unwrap();

        let calls = source.calls();
        time::sleep(TICK * 5).await;
        assert_eq!(source.calls(), calls);
    }

    #[tokio::test]
    async fn dropping_the_handle_aborts_polling() {
        let source = Arc::new(FakeSource::new(vec![Ok(vec![])]));
        let state = Arc::new(LiveState::default());

        let handle = LivePoller::spawn(source.clone(), filter(), TICK, state.clone());
        wait_for(&state, |_| true).await;
        drop(handle);

        let calls = source.calls();
        time::sleep(TICK * 5).await;
        assert_eq!(source.calls(), calls);
    }
}
