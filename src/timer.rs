//! Timer capability.
//!
//! `Scheduler::after(delay, deadline)` arranges for `deadline` to be delivered
//! back to the app once `delay` has passed and returns a [`TimerHandle`] that
//! can cancel the delivery.
//!
//! - [`TokioScheduler`] spawns a sleeping task per timer and delivers through the
//!   app event channel; cancelling aborts the task.
//! - [`ManualScheduler`] keeps a virtual clock that tests advance explicitly.
use crate::app::AppEvent;
use crate::flow::Deadline;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Cancels a scheduled deadline. Dropping the handle leaves the timer running.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Schedules deadlines against the event loop.
pub trait Scheduler {
    fn after(&mut self, delay: Duration, deadline: Deadline) -> TimerHandle;
}

/// Timers as sleeping tokio tasks.
pub struct TokioScheduler {
    event_tx: mpsc::Sender<AppEvent>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::Sender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration, deadline: Deadline) -> TimerHandle {
        let tx = self.event_tx.clone();
        tracing::debug!(?deadline, delay_ms = delay.as_millis() as u64, "Scheduling timer");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tx.send(AppEvent::Deadline(deadline)).await {
                tracing::warn!(error = %e, "Failed to deliver timer (receiver dropped)");
            }
        });

        TimerHandle::new(move || {
            handle.abort();
            tracing::debug!(?deadline, "Cancelled timer");
        })
    }
}

/// Virtual-clock scheduler for deterministic tests.
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

struct PendingTimer {
    id: u64,
    due: Duration,
    deadline: Deadline,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and return every deadline that became due,
    /// earliest first.
    pub fn advance(&self, by: Duration) -> Vec<Deadline> {
        let Ok(mut state) = self.state.lock() else {
            return Vec::new();
        };
        state.now += by;
        let now = state.now;

        let mut due: Vec<PendingTimer> = Vec::new();
        let mut i = 0;
        while i < state.pending.len() {
            if state.pending[i].due <= now {
                due.push(state.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.deadline).collect()
    }

    /// Deadlines still waiting to fire.
    pub fn pending(&self) -> Vec<Deadline> {
        self.state
            .lock()
            .map(|s| s.pending.iter().map(|t| t.deadline).collect())
            .unwrap_or_default()
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay: Duration, deadline: Deadline) -> TimerHandle {
        let Ok(mut state) = self.state.lock() else {
            return TimerHandle::detached();
        };
        state.next_id += 1;
        let id = state.next_id;
        let due = state.now + delay;
        state.pending.push(PendingTimer { id, due, deadline });
        drop(state);

        let shared = Arc::clone(&self.state);
        TimerHandle::new(move || {
            if let Ok(mut state) = shared.lock() {
                state.pending.retain(|t| t.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    const SHORTEN: Deadline = Deadline::ShortenComplete { cycle: 1 };
    const COPIED: Deadline = Deadline::CopiedExpired { token: 2 };

    #[test]
    fn test_manual_fires_in_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.after(Duration::from_millis(200), COPIED);
        scheduler.after(Duration::from_millis(100), SHORTEN);

        assert!(scheduler.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(200)),
            vec![SHORTEN, COPIED]
        );
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_manual_fires_once() {
        let mut scheduler = ManualScheduler::new();
        scheduler.after(Duration::from_millis(10), SHORTEN);
        assert_eq!(scheduler.advance(Duration::from_millis(10)), vec![SHORTEN]);
        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_manual_cancel() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.after(Duration::from_millis(10), SHORTEN);
        scheduler.after(Duration::from_millis(10), COPIED);
        handle.cancel();

        assert_eq!(scheduler.pending(), vec![COPIED]);
        assert_eq!(scheduler.advance(Duration::from_millis(10)), vec![COPIED]);
    }

    #[test]
    fn test_detached_cancel_is_noop() {
        TimerHandle::detached().cancel();
    }

    #[tokio::test]
    async fn test_tokio_scheduler_delivers_after_delay() {
        time::pause();
        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler = TokioScheduler::new(tx);
        let _handle = scheduler.after(Duration::from_millis(1500), SHORTEN);

        time::advance(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());

        time::advance(Duration::from_millis(600)).await;
        match rx.recv().await {
            Some(AppEvent::Deadline(d)) => assert_eq!(d, SHORTEN),
            _ => panic!("expected deadline"),
        }
    }

    #[tokio::test]
    async fn test_tokio_scheduler_cancel() {
        time::pause();
        let (tx, mut rx) = mpsc::channel(4);
        let mut scheduler = TokioScheduler::new(tx);
        let handle = scheduler.after(Duration::from_millis(100), SHORTEN);
        handle.cancel();

        time::advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
