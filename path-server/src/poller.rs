//! Background polling of the arrivals feed.
//!
//! Each tick refreshes the cache. Stopping takes effect at the next tick; a
//! fetch already in flight is allowed to finish, and whichever response
//! lands last is what the cache holds.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::arrivals::ArrivalsSource;
use crate::cache::CachedArrivalsClient;

/// Handle to a running poller.
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Ask the poller to stop at its next tick.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// Stop the poller and wait for it to exit.
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            warn!(error = %e, "arrivals poller task failed");
        }
    }
}

/// Spawn a task that refreshes `client` every `period`.
///
/// The first refresh happens immediately.
pub fn spawn_poller<S>(client: Arc<CachedArrivalsClient<S>>, period: Duration) -> PollerHandle
where
    S: ArrivalsSource + 'static,
{
    let (stop, stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if *stop_rx.borrow() {
                break;
            }

            match client.refresh().await {
                Ok(feed) => debug!(boards = feed.boards.len(), "arrivals refreshed"),
                Err(e) => warn!(error = %e, "arrivals refresh failed"),
            }
        }

        info!("arrivals poller stopped");
    });

    PollerHandle { stop, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::cache::test_support::*;

    #[tokio::test]
    async fn polls_until_stopped() {
        let results = (0..100).map(|i| Ok(feed(&format!("poll-{i}")))).collect();
        let client = Arc::new(CachedArrivalsClient::new(
            ScriptedSource::new(results),
            &CacheConfig::default(),
        ));

        let handle = spawn_poller(client.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(55)).await;
        handle.shutdown().await;

        let calls = client.source().calls();
        assert!(calls >= 2, "expected several polls, saw {calls}");

        // No more polls after shutdown
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(client.source().calls(), calls);
    }

    #[tokio::test]
    async fn failures_do_not_stop_polling() {
        let results = (0..100).map(|_| Err(down())).collect();
        let client = Arc::new(CachedArrivalsClient::new(
            ScriptedSource::new(results),
            &CacheConfig::default(),
        ));

        let handle = spawn_poller(client.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(45)).await;
        handle.shutdown().await;

        assert!(client.source().calls() >= 2);
    }
}
