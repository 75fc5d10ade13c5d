//! Bounded-concurrency gate for outstanding oracle calls
//!
//! Wraps a fair async semaphore: operations beyond the permit count queue
//! in FIFO order, and a slot is released exactly once per admitted
//! operation regardless of how the operation finishes. Retries of an
//! admitted operation run while still holding the slot.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Caps the number of simultaneously admitted operations
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting at most `limit` concurrent operations
    pub fn new(limit: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Maximum concurrent operations this limiter admits
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `operation` once a slot is free. The permit is held for the
    /// whole operation and released when the returned future completes,
    /// whether the operation succeeded or not.
    pub async fn acquire<F, T>(&self, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        // The semaphore is never closed, so acquisition cannot fail
        let _permit = self
            .permits
            .acquire()
            .await
            .expect("limiter semaphore is never closed");
        operation.await
    }
}
