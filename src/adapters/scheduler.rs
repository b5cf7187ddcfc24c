use crate::domain::model::{Task, TimerHandle};
use crate::domain::ports::Scheduler;
use crate::utils::error::{Result, UiError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;

/// Real timers on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Binds to the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| UiError::Runtime {
            message: e.to_string(),
        })?;
        Ok(Self { runtime })
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !guard.is_cancelled() {
                task();
            }
        });
        handle.with_abort(join.abort_handle())
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

struct ClockState {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Virtual clock: time only moves when [`ManualClock::advance`] is called.
pub struct ManualClock {
    state: Mutex<ClockState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ClockState {
                now: Duration::ZERO,
                next_seq: 0,
                pending: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn now(&self) -> Duration {
        self.state().now
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.state()
            .pending
            .iter()
            .filter(|p| !p.handle.is_cancelled())
            .count()
    }

    /// Moves time forward by `by`, running every task that falls due in
    /// deadline order. Tasks scheduled by running tasks are honoured when
    /// they fall inside the same window.
    pub fn advance(&self, by: Duration) {
        let target = self.state().now + by;
        loop {
            let next = {
                let mut state = self.state();
                state.pending.retain(|p| !p.handle.is_cancelled());
                let index = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                match index {
                    Some(i) => {
                        let task = state.pending.remove(i);
                        state.now = task.due;
                        Some(task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            match next {
                // The lock is released here so the task may schedule again.
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualClock {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.state();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(PendingTask {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_manual_clock_runs_tasks_in_deadline_order() {
        let clock = ManualClock::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for (label, ms) in [("late", 30u64), ("early", 10), ("middle", 20)] {
            let log = log.clone();
            clock.schedule(
                Duration::from_millis(ms),
                Box::new(move || log.lock().unwrap().push(label)),
            );
        }

        clock.advance(Duration::from_millis(25));
        assert_eq!(*log.lock().unwrap(), vec!["early", "middle"]);
        assert_eq!(clock.pending(), 1);

        clock.advance(Duration::from_millis(5));
        assert_eq!(*log.lock().unwrap(), vec!["early", "middle", "late"]);
        assert_eq!(clock.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_manual_clock_skips_cancelled_tasks() {
        let clock = ManualClock::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let handle = clock.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        handle.cancel();
        clock.advance(Duration::from_secs(1));

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn test_tokio_scheduler_runs_and_cancels() {
        let scheduler = TokioScheduler::current().unwrap();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let counter = runs.clone();
        let cancelled = scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.fetch_add(100, Ordering::SeqCst);
            }),
        );
        cancelled.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tokio_scheduler_requires_runtime() {
        assert!(TokioScheduler::current().is_err());
    }
}
