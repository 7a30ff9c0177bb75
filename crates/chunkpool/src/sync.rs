//! Thread-safety decorator.

use parking_lot::RwLock;

use crate::chunk::Chunk;
use crate::contract::ChunkAllocator;

/// Wraps any [`ChunkAllocator`] and serializes access to it.
///
/// Composition over a `parking_lot::RwLock`: `allocate`/`deallocate` take
/// the write lock, the introspection calls take the read lock so any number
/// of readers may run while no writer is active. The decorator adds no
/// allocation policy of its own, and there is no timeout or cancellation —
/// a blocked caller waits until the lock frees up.
///
/// The wrapped allocators are deliberately unsynchronized; this type is the
/// sole concurrency boundary in the crate. Share it by reference:
/// `&SyncAllocator<A>` itself implements [`ChunkAllocator`], so several
/// controllers or threads can draw from one pool.
pub struct SyncAllocator<A> {
    inner: RwLock<A>,
}

impl<A: ChunkAllocator> SyncAllocator<A> {
    /// Takes ownership of `allocator` and guards it with a reader/writer
    /// lock.
    pub fn new(allocator: A) -> Self {
        Self {
            inner: RwLock::new(allocator),
        }
    }

    /// Forwards to the wrapped allocator under the write lock.
    #[must_use]
    pub fn allocate(&self) -> Chunk {
        self.inner.write().allocate()
    }

    /// Forwards to the wrapped allocator under the write lock.
    pub fn deallocate(&self, chunk: Chunk) {
        self.inner.write().deallocate(chunk);
    }

    /// Total chunks tracked, under the read lock.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// Chunks currently free, under the read lock.
    #[must_use]
    pub fn remain(&self) -> usize {
        self.inner.read().remain()
    }

    /// Chunks currently issued, under the read lock.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.inner.read().in_use()
    }

    /// Unwraps the decorator, returning the inner allocator.
    pub fn into_inner(self) -> A {
        self.inner.into_inner()
    }
}
