//! Lazily-growing heap-backed allocator.

use std::collections::VecDeque;
use std::ptr::NonNull;

use crate::chunk::Chunk;
use crate::contract::ChunkAllocator;
use crate::error::ConfigError;

/// Lifecycle counters for a [`GrowableAllocator`].
///
/// Pure observation; the counters never influence allocation decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowableStats {
    /// Chunks carved fresh from the heap.
    pub carved: u64,
    /// Allocations served from the free queue.
    pub recycled: u64,
    /// Allocations denied because the chunk cap was reached.
    pub denied_allocs: u64,
    /// Deallocations rejected because the handle matched no realized chunk.
    pub rejected_frees: u64,
}

/// Carves equal-size chunks from the heap lazily, up to a configured cap.
///
/// Starts with zero chunks realized; `size()` grows as chunks are carved and
/// never shrinks. `deallocate` recycles a chunk into the FIFO free queue, it
/// does not release storage — every realized chunk owns its backing memory
/// until the allocator itself is dropped. A handle is accepted back only if
/// its base address matches a realized chunk exactly; anything else
/// (foreign, sliced, offset) is a silent no-op.
#[derive(Debug)]
pub struct GrowableAllocator {
    chunk_size: usize,
    max_chunks: usize,
    realized: Vec<Box<[u8]>>,
    free: VecDeque<usize>,
    stats: GrowableStats,
}

impl GrowableAllocator {
    /// Creates an allocator that may realize up to `max_chunks` chunks of
    /// `chunk_size` bytes.
    ///
    /// `max_chunks == 0` is legal and yields a permanently exhausted
    /// allocator.
    ///
    /// # Errors
    ///
    /// Rejects a zero chunk size.
    pub fn try_new(chunk_size: usize, max_chunks: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(Self {
            chunk_size,
            max_chunks,
            realized: Vec::new(),
            free: VecDeque::new(),
            stats: GrowableStats::default(),
        })
    }

    /// Like [`try_new`](Self::try_new), but halts on a bad configuration.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[must_use]
    pub fn new(chunk_size: usize, max_chunks: usize) -> Self {
        match Self::try_new(chunk_size, max_chunks) {
            Ok(alloc) => alloc,
            Err(err) => panic!("invalid growable allocator configuration: {err}"),
        }
    }

    /// Chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Maximum number of chunks this allocator will ever realize.
    #[must_use]
    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }

    /// Snapshot of the lifecycle counters.
    #[must_use]
    pub fn stats(&self) -> GrowableStats {
        self.stats
    }

    fn chunk_at(&mut self, index: usize) -> Chunk {
        let buf = &mut self.realized[index];
        Chunk::from_raw_parts(NonNull::from(&mut buf[..]).cast::<u8>(), self.chunk_size)
    }
}

impl ChunkAllocator for GrowableAllocator {
    fn allocate(&mut self) -> Chunk {
        if let Some(index) = self.free.pop_front() {
            self.stats.recycled += 1;
            return self.chunk_at(index);
        }
        if self.realized.len() >= self.max_chunks {
            self.stats.denied_allocs += 1;
            return Chunk::EMPTY;
        }
        self.realized
            .push(vec![0u8; self.chunk_size].into_boxed_slice());
        self.stats.carved += 1;
        self.chunk_at(self.realized.len() - 1)
    }

    fn deallocate(&mut self, chunk: Chunk) {
        let position = self
            .realized
            .iter()
            .position(|buf| buf.as_ptr().addr() == chunk.addr());
        match position {
            Some(index) => self.free.push_back(index),
            None => self.stats.rejected_frees += 1,
        }
    }

    fn size(&self) -> usize {
        self.realized.len()
    }

    fn remain(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carves_lazily() {
        let mut alloc = GrowableAllocator::new(16, 10);
        assert_eq!(alloc.size(), 0);

        let chunk = alloc.allocate();
        assert!(!chunk.is_empty());
        assert_eq!(chunk.len(), 16);
        assert_eq!(alloc.size(), 1);
        assert_eq!(alloc.in_use(), 1);
        assert_eq!(alloc.remain(), 0);
    }

    #[test]
    fn cap_of_one_chunk() {
        let mut alloc = GrowableAllocator::new(16, 1);

        let chunk = alloc.allocate();
        assert!(!chunk.is_empty());
        assert_eq!(chunk.len(), 16);

        assert!(alloc.allocate().is_empty());
        assert_eq!(alloc.size(), 1);
    }

    #[test]
    fn cap_of_zero_chunks() {
        let mut alloc = GrowableAllocator::new(16, 0);
        assert!(alloc.allocate().is_empty());
        assert_eq!(alloc.size(), 0);
    }

    #[test]
    fn recycles_after_deallocate() {
        let mut alloc = GrowableAllocator::new(16, 1);
        let chunk = alloc.allocate();
        alloc.deallocate(chunk);

        let again = alloc.allocate();
        assert!(!again.is_empty());
        assert_eq!(again.addr(), chunk.addr());
        assert_eq!(alloc.size(), 1);
    }

    #[test]
    fn fifo_reuse_order() {
        let mut alloc = GrowableAllocator::new(16, 4);
        let a = alloc.allocate();
        let b = alloc.allocate();
        let _c = alloc.allocate();

        alloc.deallocate(a);
        alloc.deallocate(b);
        assert_eq!(alloc.allocate().addr(), a.addr());
        assert_eq!(alloc.allocate().addr(), b.addr());
    }

    #[test]
    fn reuse_across_full_cycle() {
        let mut alloc = GrowableAllocator::new(16, 10);
        let chunks: Vec<Chunk> = (0..10).map(|_| alloc.allocate()).collect();
        assert!(chunks.iter().all(|c| c.len() == 16));
        assert_eq!(alloc.in_use(), 10);

        for chunk in &chunks {
            alloc.deallocate(*chunk);
        }
        assert_eq!(alloc.size(), 10);
        assert_eq!(alloc.remain(), 10);

        for _ in 0..10 {
            assert!(!alloc.allocate().is_empty());
        }
        assert_eq!(alloc.in_use(), 10);
    }

    #[test]
    fn deallocate_foreign_handle_is_noop() {
        let mut alloc = GrowableAllocator::new(16, 1);
        let chunk = alloc.allocate();
        assert_eq!(alloc.in_use(), 1);

        let sliced = Chunk::from_raw_parts(
            NonNull::new(chunk.as_ptr().wrapping_add(1)).unwrap(),
            chunk.len() - 1,
        );
        alloc.deallocate(sliced);
        assert_eq!(alloc.in_use(), 1);
        assert_eq!(alloc.remain(), 0);

        let far = Chunk::from_raw_parts(
            NonNull::new(chunk.as_ptr().wrapping_add(10_000)).unwrap(),
            16,
        );
        alloc.deallocate(far);
        assert_eq!(alloc.in_use(), 1);
        assert_eq!(alloc.remain(), 0);
    }

    #[test]
    fn stats_track_lifecycle() {
        let mut alloc = GrowableAllocator::new(16, 2);
        let a = alloc.allocate();
        let _b = alloc.allocate();
        assert!(alloc.allocate().is_empty());

        alloc.deallocate(a);
        let _again = alloc.allocate();
        alloc.deallocate(Chunk::EMPTY);

        let stats = alloc.stats();
        assert_eq!(stats.carved, 2);
        assert_eq!(stats.recycled, 1);
        assert_eq!(stats.denied_allocs, 1);
        assert_eq!(stats.rejected_frees, 1);
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert_eq!(
            GrowableAllocator::try_new(0, 4).unwrap_err(),
            ConfigError::ZeroChunkSize
        );
    }
}
