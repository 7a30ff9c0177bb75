//! Construction-time configuration errors.

use thiserror::Error;

/// Rejected allocator configuration.
///
/// These indicate a misconfigured system, not a transient condition: the
/// fallible `try_new` constructors return them, and the panicking `new`
/// convenience constructors halt with the same message. Nothing else in the
/// crate reports errors this way; exhaustion and invalid handles are ordinary
/// return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Chunk size of zero bytes.
    #[error("chunk size must be non-zero")]
    ZeroChunkSize,

    /// Backing buffer length is not an exact multiple of the chunk size.
    ///
    /// Accepting such a buffer would either expose a short trailing chunk or
    /// silently discard bytes the caller handed over; both are rejected at
    /// the boundary instead.
    #[error("buffer length {buf_len} is not a multiple of chunk size {chunk_size}")]
    UnevenBuffer {
        /// Length of the rejected backing buffer.
        buf_len: usize,
        /// Requested chunk size.
        chunk_size: usize,
    },
}
