use crate::domain::model::TimerHandle;
use crate::domain::ports::Scheduler;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

struct Inner<A> {
    scheduler: Arc<dyn Scheduler>,
    wait: Duration,
    func: Arc<dyn Fn(A) + Send + Sync>,
    /// Generation of the scheduled call plus its timer.
    pending: Mutex<Option<(u64, TimerHandle)>>,
    generation: AtomicU64,
}

/// Callable that only runs its function once calls have been quiet for
/// `wait`, with the arguments of the last call. Clones share the same
/// pending slot.
pub struct Debouncer<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn debounce<A, F>(scheduler: Arc<dyn Scheduler>, wait: Duration, func: F) -> Debouncer<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debouncer {
        inner: Arc::new(Inner {
            scheduler,
            wait,
            func: Arc::new(func),
            pending: Mutex::new(None),
            generation: AtomicU64::new(0),
        }),
    }
}

impl<A: Send + 'static> Debouncer<A> {
    /// Supersedes any pending call and schedules `func(args)`.
    pub fn call(&self, args: A) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some((_, previous)) = pending.take() {
            previous.cancel();
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let func = self.inner.func.clone();
        let owner: Weak<Inner<A>> = Arc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.wait,
            Box::new(move || {
                if let Some(inner) = owner.upgrade() {
                    let mut pending = inner.pending.lock().unwrap_or_else(PoisonError::into_inner);
                    if pending.as_ref().is_some_and(|(g, _)| *g == generation) {
                        *pending = None;
                    }
                }
                func(args)
            }),
        );
        *pending = Some((generation, handle));
    }

    pub fn is_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|(_, h)| !h.is_cancelled())
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}
