// src/polling/scheduler.rs
//! Cancellable repeating task driving a view's fetch-and-compute cycles.

use log::debug;
use std::{future::Future, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::{JoinHandle, JoinSet},
    time::interval,
};

/// Handle to a repeating poll loop.
///
/// Runs one cycle immediately on activation, then one per interval tick.
/// Cycles are spawned into a `JoinSet` rather than awaited inline, so a
/// slow or failing cycle neither blocks nor skips the next tick;
/// overlapping cycles are tolerated because every cycle only replaces
/// state, never accumulates it. `refresh()` triggers an immediate
/// out-of-band cycle without touching the interval's timing base.
/// `shutdown()` deterministically stops the loop and aborts whatever is
/// still in flight — no scheduled work survives it.
pub struct PollHandle {
    refresh_tx: mpsc::Sender<()>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut cycle: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(8);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut in_flight = JoinSet::new();
            // The first tick completes immediately: the activation cycle.
            let mut ticker = interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        while in_flight.try_join_next().is_some() {}
                        in_flight.spawn(cycle());
                    }
                    Some(()) = refresh_rx.recv() => {
                        while in_flight.try_join_next().is_some() {}
                        in_flight.spawn(cycle());
                    }
                    // Fires on an explicit shutdown signal, or when the
                    // handle is dropped and the watch sender goes away.
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            in_flight.shutdown().await;
            debug!("Poller '{}' stopped", name);
        });

        Self {
            refresh_tx,
            shutdown_tx,
            task,
        }
    }

    /// Requests an immediate out-of-band cycle.
    pub async fn refresh(&self) {
        let _ = self.refresh_tx.send(()).await;
    }

    /// Stops the loop and waits until no scheduled work remains.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };

    fn counting_handle(period_ms: u64) -> (PollHandle, Arc<AtomicU64>) {
        let count = Arc::new(AtomicU64::new(0));
        let cycles = count.clone();
        let handle = PollHandle::spawn("test", Duration::from_millis(period_ms), move || {
            let cycles = cycles.clone();
            async move {
                cycles.fetch_add(1, Ordering::SeqCst);
            }
        });
        (handle, count)
    }

    #[tokio::test]
    async fn runs_an_immediate_cycle_on_activation() {
        let (handle, count) = counting_handle(60_000);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn repeats_on_the_configured_interval() {
        let (handle, count) = counting_handle(25);
        tokio::time::sleep(Duration::from_millis(90)).await;
        handle.shutdown().await;
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn refresh_triggers_out_of_band_cycle() {
        let (handle, count) = counting_handle(60_000);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handle.refresh().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_future_cycles_deterministically() {
        let (handle, count) = counting_handle(20);
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown().await;

        let after_shutdown = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_shutdown);
    }
}
