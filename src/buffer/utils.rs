// Thu Feb 12 2026 - Alex

use crate::buffer::{BufferError, ByteBuffer};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Caller-registered strategy for adopting externally owned native memory.
pub type PointerToBuffer = fn(*mut u8, usize) -> Result<ByteBuffer, BufferError>;

static POINTER_STRATEGY: Lazy<RwLock<Option<PointerToBuffer>>> = Lazy::new(|| RwLock::new(None));

pub struct BufferUtils;

impl BufferUtils {
    pub fn create_aligned(capacity: usize, alignment: usize) -> Result<ByteBuffer, BufferError> {
        ByteBuffer::aligned(capacity, alignment)
    }

    pub fn create_64bit_aligned(capacity: usize) -> Result<ByteBuffer, BufferError> {
        ByteBuffer::aligned(capacity, 8)
    }

    pub fn set_pointer_to_buffer(strategy: PointerToBuffer) {
        *POINTER_STRATEGY.write() = Some(strategy);
    }

    pub fn pointer_to_buffer(ptr: *mut u8, capacity: usize) -> Result<ByteBuffer, BufferError> {
        let strategy = *POINTER_STRATEGY.read();
        let strategy = strategy.ok_or(BufferError::NoPointerStrategy)?;
        strategy(ptr, capacity)
    }
}
