use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use grove_common::{Error, Result};
use grove_common_traits::Relocatable;

use super::{RawBuffer, SlotState, sealed, shift_bulk};
use crate::raw_alloc;

/// Bulk buffer strategy for [`Relocatable`] element types.
///
/// Survivors of a reallocation are never touched one by one: the block is resized
/// with a single `realloc`, which may extend it in place or copy its bytes. Gaps are
/// opened with a single `memmove` of the tail, so the gap never holds anything but
/// raw memory.
pub struct RelocateBuffer<T: Relocatable> {
    ptr: NonNull<T>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Relocatable + Send> Send for RelocateBuffer<T> {}

unsafe impl<T: Relocatable + Sync> Sync for RelocateBuffer<T> {}

impl<T: Relocatable> RelocateBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> RelocateBuffer<T> {
        RelocateBuffer {
            ptr: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<T: Relocatable> sealed::Sealed for RelocateBuffer<T> {}

impl<T: Relocatable> RawBuffer<T> for RelocateBuffer<T> {
    const RELOCATES: bool = true;

    fn new() -> Self {
        RelocateBuffer::new()
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        let ptr = raw_alloc::allocate::<T>(capacity)?;
        Ok(RelocateBuffer {
            ptr,
            capacity,
            len: 0,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);
        self.len = len;
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Shrinking below the current length drops the cut-off elements before the
    /// block is resized, so only growth (and shrinking down to `len`) offers the
    /// strong guarantee.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        raw_alloc::slot_layout::<T>(new_capacity)?;
        log::trace!(
            "RelocateBuffer: resizing {} -> {} slots, {} live",
            self.capacity,
            new_capacity,
            self.len
        );
        self.truncate(new_capacity);
        self.ptr = unsafe { raw_alloc::reallocate(self.ptr, self.capacity, new_capacity)? };
        self.capacity = new_capacity;
        Ok(())
    }

    fn shift_right(&mut self, offset: usize, count: usize) -> Result<SlotState> {
        let len = self.len;
        assert!(offset <= len, "shift offset {offset} beyond length {len}");
        let needed = len
            .checked_add(count)
            .ok_or_else(|| Error::capacity_overflow(count))?;
        if needed > self.capacity {
            self.reallocate(needed)?;
        }
        unsafe { shift_bulk(self.ptr.as_ptr(), len, offset, count) };
        self.len = offset;
        Ok(SlotState::Uninit)
    }

    unsafe fn relocate_into(&mut self, slot: usize, src: *const T, count: usize) {
        debug_assert!(slot + count <= self.capacity);
        unsafe { ptr::copy_nonoverlapping(src, self.ptr.as_ptr().add(slot), count) };
    }

    fn take(&mut self) -> Self {
        std::mem::replace(self, RelocateBuffer::new())
    }
}

impl<T: Relocatable> Drop for RelocateBuffer<T> {
    fn drop(&mut self) {
        self.truncate(0);
        unsafe { raw_alloc::release(self.ptr, self.capacity) };
    }
}

impl<T: Relocatable> Default for RelocateBuffer<T> {
    fn default() -> Self {
        RelocateBuffer::new()
    }
}

impl<T: Relocatable> std::fmt::Debug for RelocateBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelocateBuffer")
            .field("len", &self.len)
            .field("cap", &self.capacity)
            .finish_non_exhaustive()
    }
}
