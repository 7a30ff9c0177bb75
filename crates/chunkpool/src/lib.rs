//! # chunkpool
//!
//! Fixed-chunk memory allocators behind one structural contract, plus a
//! controller that composes any of them into a single logically-contiguous,
//! growable, byte-addressable buffer backed by physically discontiguous
//! equal-size chunks.
//!
//! Built for environments where reallocate-and-copy growth and a
//! general-purpose heap are both unwelcome: the [`ChunkController`] grows by
//! appending chunks, never by moving bytes, and the [`FixedPoolAllocator`]
//! runs entirely inside a caller-supplied buffer.
//!
//! Expected-but-unsuccessful outcomes are ordinary return values throughout:
//! exhaustion is an empty [`Chunk`] (and a short `write`), a bogus handle on
//! `deallocate` is a no-op, an out-of-range read yields an empty slice. Only
//! construction-time misconfiguration halts.
//!
//! A note on naming: an allocator's `size()` counts chunks it tracks, and a
//! controller's [`capacity`](ChunkController::capacity) counts allocated
//! storage. Neither tracks written content — that is
//! [`ChunkController::len`].

pub mod chunk;
pub mod contract;
pub mod controller;
pub mod error;
pub mod fixed_pool;
pub mod growable;
pub mod sync;

pub use chunk::Chunk;
pub use contract::ChunkAllocator;
pub use controller::ChunkController;
pub use error::ConfigError;
pub use fixed_pool::FixedPoolAllocator;
pub use growable::{GrowableAllocator, GrowableStats};
pub use sync::SyncAllocator;
