//! Chunk controller: one logical buffer over discontiguous chunks.

use std::ptr;
use std::slice;

use crate::chunk::Chunk;
use crate::contract::ChunkAllocator;

/// Presents an ordered sequence of equal-size chunks as a single
/// append-only, randomly-readable byte buffer.
///
/// Logical offset 0 starts at the first chunk and offsets grow monotonically
/// in sequence order; chunks are not required to be adjacent in memory, and
/// growth never copies existing chunk contents. A new chunk is requested
/// from the allocator only when `write` runs out of space in the tail chunk,
/// never speculatively.
///
/// [`capacity`](Self::capacity) is allocated **storage** (the sum of held
/// chunk sizes), not written content; [`len`](Self::len) is the logical
/// length, the bytes actually written. Reads are bounded by `len()`: the
/// unwritten tail of the last chunk is never exposed.
///
/// The controller is a single-owner, single-writer abstraction and is not
/// internally synchronized. Only the allocator beneath it is a legitimately
/// shared resource — pass `&SyncAllocator<_>` as the allocator parameter for
/// that. A chunk issued to a controller belongs to that controller alone
/// until [`clear`](Self::clear) or drop returns it.
pub struct ChunkController<A: ChunkAllocator> {
    allocator: A,
    chunks: Vec<Chunk>,
    capacity: usize,
    tail_free: usize,
}

impl<A: ChunkAllocator> ChunkController<A> {
    /// Creates an empty controller drawing chunks from `allocator`.
    ///
    /// The allocator parameter is anything satisfying the contract: a
    /// concrete allocator by value, `&mut` to one that outlives the
    /// controller, or `&SyncAllocator<_>` shared with other holders.
    pub fn new(allocator: A) -> Self {
        Self {
            allocator,
            chunks: Vec::new(),
            capacity: 0,
            tail_free: 0,
        }
    }

    /// Appends `data` to the logical buffer, returning the bytes written.
    ///
    /// Fills the tail chunk first, then allocates and fills further chunks
    /// as needed. The first time the allocator reports exhaustion the write
    /// stops short and the count written so far is returned — a short write,
    /// not an error. A short write leaves the controller exactly as if the
    /// shorter write had been requested in the first place.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let mut written = 0;
        if self.tail_free != 0 {
            written += self.write_to_tail(data);
        }
        while written < data.len() {
            if !self.allocate_next() {
                break;
            }
            written += self.write_to_tail(&data[written..]);
        }
        written
    }

    /// Zero-copy read of written bytes at `offset`, within one chunk.
    ///
    /// Returns a borrowed slice into the chunk containing `offset`, at most
    /// `len` bytes long and never crossing the chunk boundary; callers that
    /// want a logically contiguous multi-chunk view use
    /// [`read_copy`](Self::read_copy). The boundary is exposed on purpose:
    /// the caller learns where chunks end instead of paying for a copy.
    ///
    /// Returns an empty slice when `offset` is at or past the logical
    /// length, or when no chunks are held. Never exposes the unwritten tail
    /// of the last chunk, even though that storage already counts toward
    /// `capacity()`.
    #[must_use]
    pub fn read(&self, offset: usize, len: usize) -> &[u8] {
        if offset >= self.len() || self.chunks.is_empty() {
            return &[];
        }
        // All chunks come from one allocator and share its chunk size.
        let chunk_size = self.chunks[0].len();
        let index = offset / chunk_size;
        let Some(chunk) = self.chunks.get(index) else {
            return &[];
        };
        let in_chunk = offset % chunk_size;
        let written = if index + 1 == self.chunks.len() {
            chunk.len() - self.tail_free
        } else {
            chunk.len()
        };
        // offset < len() already implies in_chunk < written; keep the guard
        // so an unwritten-tail offset can never underflow into a huge length.
        if in_chunk >= written {
            return &[];
        }
        let avail = len.min(written - in_chunk);
        // SAFETY: the chunk is exclusively owned by this controller,
        // in_chunk + avail <= chunk.len(), and the borrow is tied to &self,
        // so no write can overlap it.
        unsafe { slice::from_raw_parts(chunk.as_ptr().add(in_chunk), avail) }
    }

    /// Copies written bytes starting at `offset` into `dest`, stitching
    /// across chunk boundaries; returns the bytes copied.
    ///
    /// Stops early when the logical end of data is reached.
    pub fn read_copy(&self, mut offset: usize, dest: &mut [u8]) -> usize {
        let mut copied = 0;
        while copied < dest.len() {
            let part = self.read(offset, dest.len() - copied);
            if part.is_empty() {
                break;
            }
            dest[copied..copied + part.len()].copy_from_slice(part);
            copied += part.len();
            offset += part.len();
        }
        copied
    }

    /// Returns every held chunk to the allocator and resets the logical
    /// length and tail remainder to zero. Idempotent.
    pub fn clear(&mut self) {
        for chunk in self.chunks.drain(..) {
            self.allocator.deallocate(chunk);
        }
        self.capacity = 0;
        self.tail_free = 0;
    }

    /// Total storage held, in bytes: the sum of all held chunk sizes.
    ///
    /// This counts allocated storage, **not** written content — use
    /// [`len`](Self::len) for the latter. The distinction matters as soon
    /// as the tail chunk is partially filled.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Logical length: bytes actually written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capacity - self.tail_free
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwritten bytes remaining in the tail chunk.
    #[must_use]
    pub fn tail_free(&self) -> usize {
        self.tail_free
    }

    /// Copies as much of `data` as fits into the tail chunk and advances
    /// the tail bookkeeping. Returns the bytes consumed.
    fn write_to_tail(&mut self, data: &[u8]) -> usize {
        let Some(chunk) = self.chunks.last().copied() else {
            return 0;
        };
        let count = self.tail_free.min(data.len());
        let start = chunk.len() - self.tail_free;
        // SAFETY: the tail chunk is exclusively owned by this controller and
        // start + count <= chunk.len().
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), chunk.as_ptr().add(start), count);
        }
        self.tail_free -= count;
        count
    }

    /// Requests one more chunk and makes it the tail. False on exhaustion.
    fn allocate_next(&mut self) -> bool {
        let chunk = self.allocator.allocate();
        if chunk.is_empty() {
            return false;
        }
        self.capacity += chunk.len();
        self.tail_free = chunk.len();
        self.chunks.push(chunk);
        true
    }
}

impl<A: ChunkAllocator> Drop for ChunkController<A> {
    fn drop(&mut self) {
        self.clear();
    }
}
