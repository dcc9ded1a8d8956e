//! Caller-supplied cancellation and deadline for long-running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{EngineError, EngineResult};

/// Cancellation signal and optional deadline for one engine call.
///
/// The engine checks the context before issuing a store call and at every
/// disease-group boundary; it never starts new store calls once the context
/// has expired.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use namaste_engine::SearchContext;
///
/// let ctx = SearchContext::with_timeout(Duration::from_secs(2));
/// let handle = ctx.cancel_handle();
/// assert!(ctx.check().is_ok());
///
/// handle.cancel();
/// assert!(ctx.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl SearchContext {
    /// Creates a context with no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::default()
        }
    }

    /// Creates a context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Returns a handle that cancels this context from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Returns true if the context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns an error if the context was cancelled or its deadline passed.
    ///
    /// Cancellation is reported ahead of an expired deadline.
    pub fn check(&self) -> EngineResult<()> {
        if self.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(EngineError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// Cancels the [`SearchContext`] it was taken from.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Signals cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}
