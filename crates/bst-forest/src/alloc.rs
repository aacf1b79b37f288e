//! Per-tree record storage allocator.
//!
//! Every record buffer a tree hands out or takes in passes through its
//! [`FreeList`]: released buffers are kept for reuse up to a fixed capacity
//! and dropped once the list is full.

use crate::error::{BstError, Result};

/// Default number of released buffers a tree keeps for reuse.
pub const DEFAULT_FREE_LIST_CAPACITY: usize = 128;

#[derive(Debug)]
pub struct FreeList {
    record_size: usize,
    capacity: usize,
    slots: Vec<Box<[u8]>>,
}

impl FreeList {
    pub fn new(record_size: usize, capacity: usize) -> Self {
        Self {
            record_size,
            capacity,
            slots: Vec::new(),
        }
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffers waiting for reuse.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Hands out a zero-filled record buffer, recycled when one is available.
    pub fn obtain(&mut self) -> Result<Box<[u8]>> {
        if let Some(mut buf) = self.slots.pop() {
            buf.fill(0);
            tracing::trace!(remaining = self.slots.len(), "recycled record buffer");
            return Ok(buf);
        }
        fresh(self.record_size)
    }

    /// Hands out a recycled or fresh buffer holding a copy of `src`.
    pub fn obtain_copy(&mut self, src: &[u8]) -> Result<Box<[u8]>> {
        let mut buf = self.obtain()?;
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        Ok(buf)
    }

    /// Takes a buffer back. Buffers of the wrong size or beyond capacity are
    /// dropped.
    pub fn release(&mut self, buf: Box<[u8]>) {
        if buf.len() != self.record_size || self.slots.len() >= self.capacity {
            return;
        }
        self.slots.push(buf);
    }
}

fn fresh(record_size: usize) -> Result<Box<[u8]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(record_size)
        .map_err(|_| BstError::AllocationFailed(record_size))?;
    buf.resize(record_size, 0);
    Ok(buf.into_boxed_slice())
}
