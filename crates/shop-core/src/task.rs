//! Cancellable delayed tasks.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A unit of work scheduled to run after a delay.
///
/// The work runs on the ambient Tokio runtime. Dropping the handle aborts
/// it, so a timer never outlives its owner.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `work` once `delay` has elapsed.
    ///
    /// Returns `None` when called outside a Tokio runtime; the work is then
    /// never run.
    pub fn after<F>(delay: Duration, work: F) -> Option<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::after_async(delay, async move { work() })
    }

    /// Await `work` once `delay` has elapsed.
    pub fn after_async<F>(delay: Duration, work: F) -> Option<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(?delay, "no runtime, scheduled task dropped");
            return None;
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        });
        Some(Self { handle })
    }

    /// Cancel the task. Has no effect once it has run.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Check if the task has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
