// Fri Feb 13 2026 - Alex

use crate::buffer::ByteBuffer;
use crate::structure::StructureError;
use std::cell::{Cell, RefCell};
use std::fmt;

/// Owner state of a bound structure tree.
///
/// Exactly one `StructureRoot` exists per tree; it holds the raw buffer and
/// the coarse modified flag. Every descendant keeps an `Rc` back to it plus a
/// byte offset, never its own allocation.
pub struct StructureRoot {
    buffer: RefCell<ByteBuffer>,
    modified: Cell<bool>,
}

impl StructureRoot {
    pub fn new(buffer: ByteBuffer) -> Self {
        Self {
            buffer: RefCell::new(buffer),
            modified: Cell::new(false),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.borrow().capacity()
    }

    pub fn read(&self, offset: usize, out: &mut [u8]) -> Result<(), StructureError> {
        self.buffer.borrow().read(offset, out)?;
        Ok(())
    }

    /// Writes into the shared buffer and marks the tree modified.
    pub fn write(&self, offset: usize, src: &[u8]) -> Result<(), StructureError> {
        self.buffer.borrow_mut().write(offset, src)?;
        self.modified.set(true);
        Ok(())
    }

    /// Runs `f` over the full backing byte slice.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.buffer.borrow().as_slice())
    }

    pub fn mark_modified(&self) {
        self.modified.set(true);
    }

    pub fn clear_modified(&self) {
        self.modified.set(false);
    }

    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }
}

impl fmt::Debug for StructureRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureRoot")
            .field("capacity", &self.capacity())
            .field("modified", &self.modified.get())
            .finish()
    }
}
