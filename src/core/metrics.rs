//! Buffer pool metrics for observability
//!
//! Provides counters for monitoring buffer reuse, including how often the
//! pool had to allocate and how many buffers were never handed back.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for buffer pool observability
///
/// # Example
///
/// ```
/// use rust_text_encoder::PoolMetrics;
///
/// let metrics = PoolMetrics::new();
///
/// metrics.record_checkout();
/// metrics.record_allocation();
///
/// assert_eq!(metrics.checkouts(), 1);
/// assert_eq!(metrics.outstanding(), 1);
/// ```
#[derive(Debug)]
pub struct PoolMetrics {
    /// Number of buffers handed out
    checkouts: AtomicU64,

    /// Number of buffers explicitly released
    returns: AtomicU64,

    /// Number of checkouts that needed a fresh allocation
    allocations: AtomicU64,

    /// Number of released buffers dropped instead of retained
    discards: AtomicU64,
}

impl PoolMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            checkouts: AtomicU64::new(0),
            returns: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
            discards: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn checkouts(&self) -> u64 {
        self.checkouts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn returns(&self) -> u64 {
        self.returns.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn allocations(&self) -> u64 {
        self.allocations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn discards(&self) -> u64 {
        self.discards.load(Ordering::Relaxed)
    }

    /// Buffers checked out and not yet released
    ///
    /// Includes buffers that were dropped without `free`, which the pool
    /// cannot tell apart from buffers still in use.
    pub fn outstanding(&self) -> u64 {
        self.checkouts().saturating_sub(self.returns())
    }

    #[inline]
    pub fn record_checkout(&self) -> u64 {
        self.checkouts.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_return(&self) -> u64 {
        self.returns.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_allocation(&self) -> u64 {
        self.allocations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discard(&self) -> u64 {
        self.discards.fetch_add(1, Ordering::Relaxed)
    }

    /// Fraction of checkouts served from the free list (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been checked out yet.
    pub fn reuse_rate(&self) -> f64 {
        let checkouts = self.checkouts() as f64;
        if checkouts == 0.0 {
            0.0
        } else {
            let reused = checkouts - self.allocations() as f64;
            (reused / checkouts) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.checkouts.store(0, Ordering::Relaxed);
        self.returns.store(0, Ordering::Relaxed);
        self.allocations.store(0, Ordering::Relaxed);
        self.discards.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PoolMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            checkouts: AtomicU64::new(self.checkouts()),
            returns: AtomicU64::new(self.returns()),
            allocations: AtomicU64::new(self.allocations()),
            discards: AtomicU64::new(self.discards()),
        }
    }
}
