//! # Request Throttler
//!
//! A process-local queue that spaces outbound calls to a shared upstream by a
//! minimum interval. Callers enqueue work and await the result; the queue is
//! drained strictly in arrival order by a single background drain task.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::SeoError;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A FIFO throttle that guarantees a minimum interval between dispatches.
///
/// The interval is measured dispatch-to-dispatch: the timestamp is taken when
/// a job starts running, whether it later succeeds or fails. The queue lives
/// only in memory and is lost on restart.
#[derive(Clone)]
pub struct Throttler {
    inner: Arc<Inner>,
}

struct Inner {
    min_interval: Duration,
    state: Mutex<ThrottleState>,
}

#[derive(Default)]
struct ThrottleState {
    queue: VecDeque<Job>,
    last_dispatch: Option<Instant>,
    draining: bool,
}

impl Throttler {
    /// Creates a throttler that leaves at least `min_interval` between
    /// consecutive dispatches.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                min_interval,
                state: Mutex::new(ThrottleState::default()),
            }),
        }
    }

    /// Number of jobs currently waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().unwrap().queue.len()
    }

    /// Enqueues `work` and returns a future resolving to its output once the
    /// throttle dispatches it.
    ///
    /// Jobs run one at a time, in arrival order. A failing job does not
    /// disturb the jobs queued behind it. If the throttler is dropped with
    /// work still queued, the returned future resolves to
    /// `Err(SeoError::Cancelled)`.
    pub fn enqueue<F, T>(&self, work: F) -> impl Future<Output = Result<T, SeoError>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let output = work.await;
            // The caller may have given up waiting; that is not our problem.
            let _ = tx.send(output);
        });

        {
            let mut state = self.inner.state.lock().unwrap();
            state.queue.push_back(job);
            debug!(pending = state.queue.len(), "Job queued for dispatch");
        }
        self.drain();

        async move { rx.await.map_err(|_| SeoError::Cancelled) }
    }

    /// Starts the drain task if one is not already running.
    fn drain(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.draining || state.queue.is_empty() {
                return;
            }
            state.draining = true;
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            loop {
                let (job, wait_until) = {
                    let mut state = inner.state.lock().unwrap();
                    let Some(job) = state.queue.pop_front() else {
                        state.draining = false;
                        return;
                    };
                    let wait_until = state.last_dispatch.map(|t| t + inner.min_interval);
                    (job, wait_until)
                };

                if let Some(deadline) = wait_until {
                    tokio::time::sleep_until(deadline).await;
                }

                // Stamp the dispatch time before running so the spacing holds
                // regardless of how long the job takes or whether it fails.
                inner.state.lock().unwrap().last_dispatch = Some(Instant::now());
                job.await;
            }
        });
    }
}

impl std::fmt::Debug for Throttler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("Throttler")
            .field("min_interval", &self.inner.min_interval)
            .field("pending", &state.queue.len())
            .field("draining", &state.draining)
            .finish()
    }
}
