//! Chunk partitioning for incremental delivery.
//!
//! The provider renders a full utterance into memory; the session loop
//! re-emits it as fixed-size binary frames. Partitioning is deterministic:
//! an N-byte payload with chunk size C yields ceil(N/C) chunks, all of
//! size C except possibly the last.

/// Default chunk size for binary audio frames.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Split a payload into fixed-size chunks. A zero chunk size is clamped to 1.
pub fn partition(payload: &[u8], chunk_size: usize) -> std::slice::Chunks<'_, u8> {
    payload.chunks(chunk_size.max(1))
}
