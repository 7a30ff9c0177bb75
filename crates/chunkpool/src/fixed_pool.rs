//! Fixed-capacity pool allocator over a caller-owned buffer.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::chunk::Chunk;
use crate::contract::ChunkAllocator;
use crate::error::ConfigError;

/// Slices one caller-owned buffer into equal chunks up front.
///
/// The whole backing region exists for the allocator's lifetime, so
/// `size()` never changes after construction: once `remain()` hits zero,
/// `allocate` returns [`Chunk::EMPTY`] until something is deallocated.
/// Free chunks are reused in FIFO order (first deallocated, first
/// reallocated), which keeps reuse deterministic and testable.
///
/// The free set is an index queue over the buffer; a returned handle is
/// mapped back to its index at the `deallocate` boundary and rejected there
/// when the address is foreign, misaligned, or out of range.
#[derive(Debug)]
pub struct FixedPoolAllocator<'buf> {
    base: NonNull<u8>,
    chunk_size: usize,
    chunk_count: usize,
    free: VecDeque<usize>,
    _buf: PhantomData<&'buf mut [u8]>,
}

impl<'buf> FixedPoolAllocator<'buf> {
    /// Slices `buf` into chunks of `chunk_size` bytes.
    ///
    /// # Errors
    ///
    /// Rejects a zero chunk size and a buffer whose length is not an exact
    /// multiple of `chunk_size`. Allocators must never hand out a short
    /// trailing chunk, and silently dropping remainder bytes would desync
    /// the bookkeeping from what the caller provided.
    pub fn try_new(buf: &'buf mut [u8], chunk_size: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if !buf.len().is_multiple_of(chunk_size) {
            return Err(ConfigError::UnevenBuffer {
                buf_len: buf.len(),
                chunk_size,
            });
        }
        let chunk_count = buf.len() / chunk_size;
        let mut free = VecDeque::with_capacity(chunk_count);
        free.extend(0..chunk_count);
        Ok(Self {
            base: NonNull::from(buf).cast::<u8>(),
            chunk_size,
            chunk_count,
            free,
            _buf: PhantomData,
        })
    }

    /// Like [`try_new`](Self::try_new), but halts on a bad configuration.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero or `buf.len()` is not a multiple of it.
    #[must_use]
    pub fn new(buf: &'buf mut [u8], chunk_size: usize) -> Self {
        match Self::try_new(buf, chunk_size) {
            Ok(pool) => pool,
            Err(err) => panic!("invalid fixed pool configuration: {err}"),
        }
    }

    /// Chunk size in bytes. Every issued chunk has exactly this length.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl ChunkAllocator for FixedPoolAllocator<'_> {
    fn allocate(&mut self) -> Chunk {
        let Some(index) = self.free.pop_front() else {
            return Chunk::EMPTY;
        };
        // SAFETY: index came from the free queue, so it is < chunk_count and
        // the offset stays inside the backing buffer.
        let ptr = unsafe { self.base.add(index * self.chunk_size) };
        Chunk::from_raw_parts(ptr, self.chunk_size)
    }

    fn deallocate(&mut self, chunk: Chunk) {
        if chunk.is_empty() {
            return;
        }
        let base = self.base.as_ptr().addr();
        let Some(offset) = chunk.addr().checked_sub(base) else {
            return;
        };
        if !offset.is_multiple_of(self.chunk_size) {
            return;
        }
        let index = offset / self.chunk_size;
        if index >= self.chunk_count {
            return;
        }
        self.free.push_back(index);
    }

    fn size(&self) -> usize {
        self.chunk_count
    }

    fn remain(&self) -> usize {
        self.free.len()
    }
}

// SAFETY: the allocator holds the sole reference to the backing buffer for
// 'buf; moving it to another thread moves that exclusive access with it.
unsafe impl Send for FixedPoolAllocator<'_> {}
// SAFETY: &self methods only read the index bookkeeping, never the buffer.
unsafe impl Sync for FixedPoolAllocator<'_> {}
