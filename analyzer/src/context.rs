use psyche_core::CoreError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Deadline and cancellation signal shared by every step of one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    deadline: Instant,
    budget: Duration,
    cancelled: watch::Receiver<bool>,
}

/// Cancels the analysis whose context it was created with.
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl AnalysisContext {
    pub fn with_timeout(budget: Duration) -> Self {
        Self::cancellable(budget).0
    }

    pub fn cancellable(budget: Duration) -> (Self, CancellationHandle) {
        let (sender, cancelled) = watch::channel(false);
        let ctx = Self {
            deadline: Instant::now() + budget,
            budget,
            cancelled,
        };
        let handle = CancellationHandle {
            sender: Arc::new(sender),
        };
        (ctx, handle)
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Fails if the analysis must not start another step.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return Err(CoreError::Timeout {
                budget: self.budget,
            });
        }
        Ok(())
    }

    /// Drives `step` until it finishes, the deadline passes or the analysis
    /// is cancelled. An interrupted step is dropped, which aborts its I/O.
    pub async fn run<F>(&self, step: F) -> Result<F::Output, CoreError>
    where
        F: Future,
    {
        self.check()?;

        let mut cancelled = self.cancelled.clone();
        tokio::select! {
            biased;
            _ = wait_for_cancel(&mut cancelled) => Err(CoreError::Cancelled),
            output = tokio::time::timeout_at(self.deadline, step) => {
                output.map_err(|_| CoreError::Timeout { budget: self.budget })
            }
        }
    }
}

async fn wait_for_cancel(cancelled: &mut watch::Receiver<bool>) {
    let closed = cancelled.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
        // Every handle is gone, so cancellation can no longer happen.
        std::future::pending::<()>().await;
    }
}
