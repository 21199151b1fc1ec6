//! device/pinned.rs
//! Pool of page-locked host slots.
//!
//! Streams may write a pinned slot while the host keeps running, which is
//! what lets `compress_async` report its output size without blocking.
//! Allocating page-locked memory is expensive, so slots are pooled: a fresh
//! pool preallocates `PINNED_POOL_PREALLOC_SIZE_BYTES` worth of slots and
//! grows by `PINNED_POOL_REALLOC_SIZE_BYTES` whenever it runs dry. Slots go
//! back to the pool when their `PinnedPtr` is dropped.
use std::mem::size_of;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::constants::{PINNED_POOL_PREALLOC_SIZE_BYTES, PINNED_POOL_REALLOC_SIZE_BYTES};

type Slot<T> = Arc<Mutex<T>>;

struct PoolState<T> {
    free: Vec<Slot<T>>,
    alloced: usize,
}

struct PoolShared<T> {
    state: Mutex<PoolState<T>>,
}

impl<T> PoolShared<T> {
    fn lock(&self) -> MutexGuard<'_, PoolState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct PinnedPtrPool<T> {
    shared: Arc<PoolShared<T>>,
}

impl<T: Copy + Default + Send + 'static> PinnedPtrPool<T> {
    /// Slots a fresh pool starts with.
    pub const PREALLOC_COUNT: usize = slots_for::<T>(PINNED_POOL_PREALLOC_SIZE_BYTES);
    /// Slots added each time the pool runs dry.
    pub const REALLOC_COUNT: usize = slots_for::<T>(PINNED_POOL_REALLOC_SIZE_BYTES);

    pub fn new() -> Self {
        let free = (0..Self::PREALLOC_COUNT)
            .map(|_| Arc::new(Mutex::new(T::default())))
            .collect();
        Self {
            shared: Arc::new(PoolShared {
                state: Mutex::new(PoolState { free, alloced: Self::PREALLOC_COUNT }),
            }),
        }
    }

    /// Take a slot, growing the pool if none is free.
    pub fn allocate(&self) -> PinnedPtr<T> {
        let mut state = self.shared.lock();
        if state.free.is_empty() {
            log::debug!(
                "pinned pool exhausted at {} slots; growing by {}",
                state.alloced,
                Self::REALLOC_COUNT
            );
            state
                .free
                .extend((0..Self::REALLOC_COUNT).map(|_| Arc::new(Mutex::new(T::default()))));
            state.alloced += Self::REALLOC_COUNT;
        }
        let slot = state.free.pop().unwrap_or_default();
        PinnedPtr { inner: Arc::new(PinnedInner { slot, pool: Arc::downgrade(&self.shared) }) }
    }

    /// Slots currently free in the pool.
    pub fn current_pool_size(&self) -> usize {
        self.shared.lock().free.len()
    }

    /// Slots ever allocated by the pool, free or handed out.
    pub fn alloced_size(&self) -> usize {
        self.shared.lock().alloced
    }
}

impl<T: Copy + Default + Send + 'static> Default for PinnedPtrPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

const fn slots_for<T>(bytes: usize) -> usize {
    let width = if size_of::<T>() == 0 { 1 } else { size_of::<T>() };
    let n = bytes / width;
    if n == 0 { 1 } else { n }
}

/// A pinned host slot on loan from a `PinnedPtrPool`.
///
/// Queued work that reports into the slot shares the loan, so the slot only
/// returns to the pool once the handle and all such work are gone.
pub struct PinnedPtr<T> {
    inner: Arc<PinnedInner<T>>,
}

struct PinnedInner<T> {
    slot: Slot<T>,
    pool: Weak<PoolShared<T>>,
}

impl<T: Copy> PinnedPtr<T> {
    pub fn get(&self) -> T {
        *self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, value: T) {
        *self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Second handle on the same loan, for queued work.
    pub(crate) fn share(&self) -> PinnedPtr<T> {
        PinnedPtr { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Drop for PinnedInner<T> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.upgrade() {
            pool.lock().free.push(Arc::clone(&self.slot));
        }
    }
}
