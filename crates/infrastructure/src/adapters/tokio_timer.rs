//! Tokio-backed cancellable timer

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use applymail_application::ports::CancellableTimer;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// A timer that runs each start as a sleeping task on a tokio runtime.
///
/// Cancelling aborts the task. Every start gets its own flag, so an aborted
/// run that already woke up can never mark a later run as fired.
#[derive(Debug)]
pub struct TokioTimer {
    handle: Handle,
    task: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl TokioTimer {
    /// Creates an idle timer that spawns onto `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            task: None,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an idle timer on the runtime of the calling task.
    /// Returns `None` outside a runtime.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl CancellableTimer for TokioTimer {
    fn start(&mut self, delay: Duration) {
        self.cancel();

        let fired = Arc::clone(&self.fired);
        self.task = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            fired.store(true, Ordering::Release);
        }));
        trace!(?delay, "timer started");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.fired = Arc::new(AtomicBool::new(false));
    }

    fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
