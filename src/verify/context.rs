//! Umbrella cancellation and per-stage deadlines.
//!
//! A [`ProbeContext`] pairs the run-wide cancellation token with an optional
//! deadline. Each stage derives its own context with [`ProbeContext::with_timeout`]
//! so that canceling the umbrella token reaches every in-flight stage, while a
//! slow stage only ever exhausts its own budget.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a stage stopped before its work completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// The stage deadline passed.
    DeadlineExceeded,
    /// The umbrella context was canceled.
    Canceled,
}

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupted::DeadlineExceeded => f.write_str("deadline exceeded"),
            Interrupted::Canceled => f.write_str("context canceled"),
        }
    }
}

impl std::error::Error for Interrupted {}

/// Cancellation token plus optional deadline, cheap to clone.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ProbeContext {
    /// Root context with no deadline, canceled through `cancel`.
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Root context that is never canceled.
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    /// Derives a context that expires after `timeout`, or at the parent's
    /// deadline if that comes first.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(deadline),
        }
    }

    /// Derives a context that expires after `timeout` regardless of this
    /// context's deadline. Cancellation is still shared.
    pub fn with_own_timeout(&self, timeout: Duration) -> Self {
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Deadline of this context, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the umbrella token has been canceled.
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current state without waiting: `Err` if canceled or past the deadline.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancel.is_cancelled() {
            return Err(Interrupted::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Interrupted::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drives `fut` until it completes, the deadline passes or the context is
    /// canceled, whichever happens first. An interrupted future is dropped.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        self.check()?;
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .map_err(|_| Interrupted::DeadlineExceeded),
                None => Ok(fut.await),
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Interrupted::Canceled),
            result = bounded => result,
        }
    }
}
