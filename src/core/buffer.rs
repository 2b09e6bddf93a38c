//! Reusable byte buffers and the pool that hands them out
//!
//! A [`Buffer`] is checked out of a [`BufferPool`], written into by exactly
//! one encoder, and handed back with [`Buffer::free`]. The free list is a
//! bounded lock-free channel, so concurrent checkouts never observe the same
//! buffer twice.

use super::metrics::PoolMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Initial capacity of freshly allocated buffers
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Maximum number of idle buffers retained by a pool
pub const DEFAULT_POOL_SIZE: usize = 256;

/// Buffers that grew beyond this capacity are not retained on release
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Growable byte buffer, optionally tied to the pool it came from
pub struct Buffer {
    bytes: Vec<u8>,
    pool: Option<BufferPool>,
}

impl Buffer {
    /// Create a standalone buffer that is not backed by any pool
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            pool: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Last byte written, if any
    #[inline]
    pub fn last(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    /// Reset length to zero, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Shrink the content back to `len` bytes
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Grow by `additional` zeroed bytes and return them for in-place writes
    pub(crate) fn spare(&mut self, additional: usize) -> &mut [u8] {
        let start = self.bytes.len();
        self.bytes.resize(start + additional, 0);
        &mut self.bytes[start..]
    }

    /// Take the written bytes, detaching them from the pool
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Release this buffer back to the pool it was checked out from
    ///
    /// Standalone buffers are simply dropped.
    pub fn free(self) {
        let Buffer { bytes, pool } = self;
        if let Some(pool) = pool {
            pool.put(bytes);
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Buffer {
    /// Copy into an independent allocation pre-sized to the source capacity
    ///
    /// The copy was never checked out, so it is detached from the pool and
    /// `free` simply drops it.
    fn clone(&self) -> Self {
        let mut bytes = Vec::with_capacity(self.bytes.capacity());
        bytes.extend_from_slice(&self.bytes);
        Self { bytes, pool: None }
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("content", &String::from_utf8_lossy(&self.bytes))
            .field("capacity", &self.bytes.capacity())
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

struct PoolInner {
    free_tx: Sender<Vec<u8>>,
    free_rx: Receiver<Vec<u8>>,
    initial_capacity: usize,
    max_retained_capacity: usize,
    metrics: PoolMetrics,
}

/// Thread-safe pool of reusable [`Buffer`]s
///
/// Cloning the pool is cheap and yields a handle to the same free list.
///
/// # Example
///
/// ```
/// use rust_text_encoder::BufferPool;
///
/// let pool = BufferPool::new();
/// let mut buf = pool.get();
/// buf.push_str("hello");
/// buf.free();
///
/// let buf = pool.get();
/// assert!(buf.is_empty());
/// ```
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_POOL_SIZE,
            DEFAULT_BUFFER_CAPACITY,
            DEFAULT_MAX_RETAINED_CAPACITY,
        )
    }

    /// Create a pool retaining at most `max_buffers` idle buffers
    #[must_use]
    pub fn with_config(
        max_buffers: usize,
        initial_capacity: usize,
        max_retained_capacity: usize,
    ) -> Self {
        let (free_tx, free_rx) = bounded(max_buffers.max(1));
        Self {
            inner: Arc::new(PoolInner {
                free_tx,
                free_rx,
                initial_capacity,
                max_retained_capacity,
                metrics: PoolMetrics::new(),
            }),
        }
    }

    /// Process-wide pool shared by encoders that were not given one
    pub fn global() -> &'static BufferPool {
        static GLOBAL: OnceLock<BufferPool> = OnceLock::new();
        GLOBAL.get_or_init(BufferPool::new)
    }

    /// Check out an empty buffer
    pub fn get(&self) -> Buffer {
        let inner = &self.inner;
        inner.metrics.record_checkout();

        let bytes = match inner.free_rx.try_recv() {
            Ok(mut bytes) => {
                bytes.clear();
                bytes
            }
            Err(_) => {
                inner.metrics.record_allocation();
                Vec::with_capacity(inner.initial_capacity)
            }
        };

        Buffer {
            bytes,
            pool: Some(self.clone()),
        }
    }

    fn put(&self, bytes: Vec<u8>) {
        let inner = &self.inner;
        inner.metrics.record_return();

        if bytes.capacity() > inner.max_retained_capacity {
            inner.metrics.record_discard();
            return;
        }

        match inner.free_tx.try_send(bytes) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                inner.metrics.record_discard();
                tracing::debug!(
                    idle = inner.free_rx.len(),
                    "buffer pool full, discarding released buffer"
                );
            }
        }
    }

    /// Number of idle buffers currently retained
    pub fn idle(&self) -> usize {
        self.inner.free_rx.len()
    }

    pub fn metrics(&self) -> &PoolMetrics {
        &self.inner.metrics
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle())
            .field("initial_capacity", &self.inner.initial_capacity)
            .field("max_retained_capacity", &self.inner.max_retained_capacity)
            .field("metrics", &self.inner.metrics)
            .finish()
    }
}
