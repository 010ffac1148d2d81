//! Cross-actor order visibility.
//!
//! There is no push channel between actors sharing a store; admin and
//! courier views stay current by re-reading the order collection on a
//! fixed interval (about five seconds by default). The only guarantee is
//! "eventually re-read" — snapshots carry no ordering beyond that.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;

use gasdepot_core::Order;

use crate::repos::orders::OrderRepository;

/// How often snapshots are taken when the caller does not say.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Granularity of the stop check inside the poll loop.
const STOP_CHECK: Duration = Duration::from_millis(50);

/// Background poller delivering order snapshots.
///
/// Dropping the watcher stops the thread.
pub struct OrderWatcher {
    stop: Arc<AtomicBool>,
    rx: Receiver<Vec<Order>>,
    handle: Option<JoinHandle<()>>,
}

impl OrderWatcher {
    /// Start polling `orders` every `interval`.
    #[must_use]
    pub fn spawn(orders: OrderRepository, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        // one pending snapshot is enough; a slow reader just gets the
        // freshest one that fit
        let (tx, rx) = sync_channel(1);

        let handle = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || poll_loop(&orders, interval, &stop, &tx))
        };

        Self {
            stop,
            rx,
            handle: Some(handle),
        }
    }

    /// The most recent snapshot delivered since the last call, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Vec<Order>> {
        self.rx.try_iter().last()
    }

    /// Block until the next snapshot arrives (or the poller dies).
    #[must_use]
    pub fn next_snapshot(&self) -> Option<Vec<Order>> {
        self.rx.recv().ok()
    }
}

impl Drop for OrderWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poll_loop(
    orders: &OrderRepository,
    interval: Duration,
    stop: &AtomicBool,
    tx: &SyncSender<Vec<Order>>,
) {
    while !stop.load(Ordering::Relaxed) {
        match orders.get_all() {
            Ok(snapshot) => match tx.try_send(snapshot) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => return,
            },
            Err(e) => warn!(error = %e, "order poll failed"),
        }

        let mut slept = Duration::ZERO;
        while slept < interval {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            thread::sleep(STOP_CHECK);
            slept += STOP_CHECK;
        }
    }
}
