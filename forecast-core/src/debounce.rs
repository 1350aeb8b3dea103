//! Trailing-edge debouncing over Tokio tasks.

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::task::JoinHandle;

/// Quiet period before a typed query is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1200);

/// Owns at most one scheduled task.
///
/// Scheduling aborts the previous task if it is still waiting, so only the
/// last call in a burst runs. Work whose delay has already elapsed keeps
/// running to completion: only unfired timers are cancelled.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: Mutex::new(None) }
    }

    /// Run `work` once `delay` passes without another call to `schedule`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn schedule<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so aborting this handle cannot cut the work short.
            let _ = tokio::spawn(work).await;
        });

        if let Some(previous) = self.slot().replace(handle) {
            if !previous.is_finished() {
                tracing::trace!("debounce restarted");
            }
            previous.abort();
        }
    }

    /// Drop the pending task without running it.
    pub fn cancel(&self) {
        if let Some(previous) = self.slot().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the pending task, if any, to fire and finish.
    pub async fn flush(&self) {
        let handle = self.slot().take();
        if let Some(handle) = handle {
            // A cancelled task is not an error here.
            let _ = handle.await;
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn push(log: Arc<Mutex<Vec<String>>>, value: String) -> impl Future<Output = ()> + Send {
        async move { log.lock().unwrap().push(value) }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_value() {
        let log = recorder();
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        for text in ["L", "Lo", "Lon", "Lond", "Londo"] {
            debouncer.schedule(push(Arc::clone(&log), text.into()));
            tokio::time::advance(Duration::from_millis(200)).await;
        }
        assert!(log.lock().unwrap().is_empty());

        debouncer.flush().await;
        assert_eq!(*log.lock().unwrap(), ["Londo"]);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_delay() {
        let log = recorder();
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        debouncer.schedule(push(Arc::clone(&log), "Paris".into()));
        tokio::time::sleep(Duration::from_millis(1199)).await;
        assert!(log.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*log.lock().unwrap(), ["Paris"]);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_gap_lets_both_fire() {
        let log = recorder();
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        debouncer.schedule(push(Arc::clone(&log), "Rome".into()));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        debouncer.schedule(push(Arc::clone(&log), "Roma".into()));
        debouncer.flush().await;

        assert_eq!(*log.lock().unwrap(), ["Rome", "Roma"]);
    }

    #[tokio::test(start_paused = true)]
    async fn fired_work_survives_a_later_schedule() {
        let log = recorder();
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        let slow = {
            let log = Arc::clone(&log);
            async move {
                tokio::time::sleep(Duration::from_secs(3)).await;
                log.lock().unwrap().push("slow".to_string());
            }
        };
        debouncer.schedule(slow);
        tokio::time::sleep(Duration::from_millis(1300)).await;

        debouncer.schedule(push(Arc::clone(&log), "fast".into()));
        debouncer.flush().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*log.lock().unwrap(), ["fast", "slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_work() {
        let log = recorder();
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        debouncer.schedule(push(Arc::clone(&log), "Berlin".into()));
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn flush_without_pending_returns_immediately() {
        let debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.flush().await;
        assert!(!debouncer.is_pending());
    }
}
