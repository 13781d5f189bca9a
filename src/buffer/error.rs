// Thu Feb 12 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("cannot allocate a zero-capacity buffer")]
    ZeroCapacity,
    #[error("invalid alignment: {0} (must be a power of two)")]
    BadAlignment(usize),
    #[error("allocation of {0} bytes failed")]
    AllocationFailed(usize),
    #[error("null pointer cannot be adopted as a buffer")]
    NullPointer,
    #[error("no pointer-to-buffer strategy registered")]
    NoPointerStrategy,
    #[error("range at offset {offset} (+{len} bytes) exceeds buffer capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
}
