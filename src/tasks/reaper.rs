//! Cache Reaper Task
//!
//! Background task that periodically removes stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::cache::CacheStore;

/// Handle to a running reaper task.
///
/// Dropping the handle closes the shutdown channel, which also ends the task.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for it to finish.
    pub async fn stop(self) {
        // Err only means the task already exited
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            if e.is_panic() {
                warn!("Cache reaper panicked: {}", e);
            }
        }
    }
}

/// Spawns a background task that sweeps stale entries from `store`.
///
/// The task wakes every `interval`, starting one `interval` after spawn. On
/// each tick it takes the store lock once and removes every entry whose
/// `created_at + interval` is before the current instant, so the same
/// duration serves as wake period and maximum age. An entry therefore lives
/// at least `interval` and at most about `2 * interval`.
///
/// `interval` must be non-zero and no longer than
/// [`MAX_INTERVAL`](crate::cache::MAX_INTERVAL), and the call must happen
/// inside a Tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(5));
/// // Later, when done:
/// reaper.stop().await;
/// ```
pub fn spawn_reaper(store: Arc<Mutex<CacheStore>>, interval: Duration) -> ReaperHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        debug!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.lock().await.reap_expired(Instant::now(), interval);

                    if removed > 0 {
                        debug!("Cache reaper: removed {} stale entries", removed);
                    } else {
                        trace!("Cache reaper: no stale entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Cache reaper stopped");
    });

    ReaperHandle { shutdown, task }
}
