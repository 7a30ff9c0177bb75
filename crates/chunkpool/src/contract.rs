//! The allocator contract.
//!
//! Every concrete allocator, and the chunk controller's generic parameter,
//! satisfies [`ChunkAllocator`]. The trait is the seam that keeps the
//! controller allocator-agnostic without runtime indirection: callers pick a
//! concrete allocator at the type level and calls stay direct.

use crate::chunk::Chunk;
use crate::sync::SyncAllocator;

/// Capability set shared by all fixed-chunk allocators.
///
/// All five operations are leaf-level state operations: they never block on
/// or call into another component. `size()` counts chunks the allocator
/// currently tracks (issued plus free), **not** bytes written by anyone
/// holding those chunks.
pub trait ChunkAllocator {
    /// Returns a free chunk, or [`Chunk::EMPTY`] when none is available.
    ///
    /// Exhaustion is an ordinary outcome, never a panic.
    fn allocate(&mut self) -> Chunk;

    /// Returns a chunk to the free set.
    ///
    /// A handle that this allocator never issued, or that was derived by
    /// slicing/offsetting an issued handle, is silently ignored. Validation
    /// is by address and bounds, never by the handle's declared length.
    fn deallocate(&mut self, chunk: Chunk);

    /// Total chunks currently tracked (issued + free).
    fn size(&self) -> usize;

    /// Chunks currently free.
    fn remain(&self) -> usize;

    /// Chunks currently issued.
    fn in_use(&self) -> usize {
        self.size() - self.remain()
    }
}

impl<A: ChunkAllocator + ?Sized> ChunkAllocator for &mut A {
    fn allocate(&mut self) -> Chunk {
        (**self).allocate()
    }

    fn deallocate(&mut self, chunk: Chunk) {
        (**self).deallocate(chunk);
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn remain(&self) -> usize {
        (**self).remain()
    }

    fn in_use(&self) -> usize {
        (**self).in_use()
    }
}

/// A shared reference to a synchronized allocator is itself an allocator.
///
/// This is how several controllers (or threads) draw chunks from one pool:
/// each holds `&SyncAllocator<A>` and the decorator's lock serializes the
/// mutating calls.
impl<A: ChunkAllocator> ChunkAllocator for &SyncAllocator<A> {
    fn allocate(&mut self) -> Chunk {
        SyncAllocator::allocate(self)
    }

    fn deallocate(&mut self, chunk: Chunk) {
        SyncAllocator::deallocate(self, chunk);
    }

    fn size(&self) -> usize {
        SyncAllocator::size(self)
    }

    fn remain(&self) -> usize {
        SyncAllocator::remain(self)
    }

    fn in_use(&self) -> usize {
        SyncAllocator::in_use(self)
    }
}
