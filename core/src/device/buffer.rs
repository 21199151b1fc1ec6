//! device/buffer.rs
//! Caller-owned device memory.
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use bytes::Bytes;

use crate::types::CompressionError;

/// Handle to a block of device memory.
///
/// Clones share the same allocation. Sessions never take ownership: queued
/// work holds a clone only until it has run. The length is fixed at
/// allocation and readable without touching the data lock.
#[derive(Clone, Debug, Default)]
pub struct DeviceBuffer {
    data: Arc<RwLock<Vec<u8>>>,
    len: usize,
}

impl DeviceBuffer {
    /// Allocate `len` zeroed bytes.
    pub fn zeroed(len: usize) -> Self {
        Self { data: Arc::new(RwLock::new(vec![0u8; len])), len }
    }

    /// Allocate and fill from host memory (synchronous copy).
    pub fn from_host(src: &[u8]) -> Self {
        Self { data: Arc::new(RwLock::new(src.to_vec())), len: src.len() }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the first `len` bytes back to the host.
    ///
    /// Synchronous with respect to the host only; synchronize the stream
    /// that writes this buffer first.
    pub fn to_host(&self, len: usize) -> Result<Bytes, CompressionError> {
        if len > self.len {
            return Err(CompressionError::invalid_value(format!(
                "copy of {} bytes exceeds buffer of {} bytes",
                len, self.len
            )));
        }
        Ok(Bytes::copy_from_slice(&self.read()[..len]))
    }

    /// True when both handles name the same allocation.
    pub fn same_allocation(&self, other: &DeviceBuffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<u8>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Kernels write in place; the allocation never resizes.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<u8>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail when `bytes` does not fit this buffer.
    pub(crate) fn check_len(&self, bytes: usize, what: &str) -> Result<(), CompressionError> {
        let have = self.len();
        if bytes > have {
            return Err(CompressionError::invalid_value(format!(
                "{} size {} exceeds its buffer of {} bytes",
                what, bytes, have
            )));
        }
        Ok(())
    }
}
