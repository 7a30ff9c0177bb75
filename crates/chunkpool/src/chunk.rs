//! Chunk handles.
//!
//! A [`Chunk`] is a non-owning view over a fixed-size run of bytes issued by
//! an allocator. It carries no metadata and no ownership tracking of its own;
//! all bookkeeping lives in the issuing allocator, and the ownership
//! discipline (a chunk belongs to exactly one holder between `allocate` and
//! the matching `deallocate`) is enforced by that bookkeeping plus the
//! holder never retaining a handle it has returned.

use std::fmt;
use std::ptr::NonNull;

/// A fixed-size contiguous byte extent issued by an allocator.
///
/// Identity is the starting address: allocators validate returned handles by
/// address, never by the handle's declared length. The distinguished
/// [`Chunk::EMPTY`] value is the ordinary "no chunk available" return from
/// `allocate`; exhaustion is an expected outcome, not a fault.
///
/// A `Chunk` is `Copy`, like the address-and-length pair it is. Copying does
/// not duplicate ownership: using a handle after it has been deallocated, or
/// after the controller holding it was cleared or dropped, is a caller bug.
#[derive(Clone, Copy)]
pub struct Chunk {
    ptr: NonNull<u8>,
    len: usize,
}

impl Chunk {
    /// The empty sentinel chunk, returned by `allocate` on exhaustion.
    pub const EMPTY: Self = Self {
        ptr: NonNull::dangling(),
        len: 0,
    };

    /// Builds a handle from a base pointer and the allocator's chunk size.
    pub(crate) fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Length of the chunk in bytes. Zero only for the empty sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is the empty sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Starting address of the chunk. Defines the chunk's identity.
    #[must_use]
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr().addr()
    }

    /// Raw base pointer of the chunk.
    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("len", &self.len)
            .finish()
    }
}

// SAFETY: a `Chunk` is an address-and-length pair. It performs no access by
// itself; whoever holds the chunk is its single owner and is responsible for
// synchronizing access to the bytes behind it.
unsafe impl Send for Chunk {}
// SAFETY: as above; shared references to the handle expose only the address
// and length.
unsafe impl Sync for Chunk {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel() {
        let chunk = Chunk::EMPTY;
        assert!(chunk.is_empty());
        assert_eq!(chunk.len(), 0);
    }

    #[test]
    fn raw_parts_round_trip() {
        let mut buf = [0u8; 64];
        let ptr = NonNull::new(buf.as_mut_ptr()).unwrap();
        let chunk = Chunk::from_raw_parts(ptr, buf.len());
        assert!(!chunk.is_empty());
        assert_eq!(chunk.len(), 64);
        assert_eq!(chunk.addr(), buf.as_ptr().addr());
    }
}
