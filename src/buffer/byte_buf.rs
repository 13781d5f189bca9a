// Thu Feb 12 2026 - Alex

use crate::buffer::BufferError;
use crate::utils::MathUtils;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::ptr::NonNull;
use std::slice;

/// A raw, alignment-guaranteed byte buffer.
///
/// Owned buffers are allocated zeroed and freed on drop. Buffers adopted from
/// an external pointer are never freed here; their lifetime belongs to the
/// caller that produced the pointer.
pub struct ByteBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
    alignment: usize,
    owned: bool,
}

impl ByteBuffer {
    pub fn aligned(capacity: usize, alignment: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        if !MathUtils::is_power_of_two(alignment) {
            return Err(BufferError::BadAlignment(alignment));
        }
        let layout = Layout::from_size_align(capacity, alignment)
            .map_err(|_| BufferError::BadAlignment(alignment))?;
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(BufferError::AllocationFailed(capacity))?;
        Ok(Self {
            ptr,
            capacity,
            alignment,
            owned: true,
        })
    }

    /// Wraps externally owned memory without taking ownership.
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `capacity` bytes for the
    /// whole lifetime of the returned buffer.
    pub unsafe fn from_raw(ptr: *mut u8, capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        let ptr = NonNull::new(ptr).ok_or(BufferError::NullPointer)?;
        Ok(Self {
            ptr,
            capacity,
            alignment: 1,
            owned: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    pub fn read(&self, offset: usize, out: &mut [u8]) -> Result<(), BufferError> {
        self.check_range(offset, out.len())?;
        out.copy_from_slice(&self.as_slice()[offset..offset + out.len()]);
        Ok(())
    }

    pub fn write(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        self.check_range(offset, src.len())?;
        let len = src.len();
        self.as_mut_slice()[offset..offset + len].copy_from_slice(src);
        Ok(())
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<(), BufferError> {
        if offset.checked_add(len).map_or(true, |end| end > self.capacity) {
            return Err(BufferError::OutOfBounds {
                offset,
                len,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Drop for ByteBuffer {
    fn drop(&mut self) {
        if self.owned {
            // alignment/capacity were validated when the buffer was created
            let layout = unsafe { Layout::from_size_align_unchecked(self.capacity, self.alignment) };
            unsafe { dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.capacity)
            .field("alignment", &self.alignment)
            .field("owned", &self.owned)
            .finish()
    }
}
