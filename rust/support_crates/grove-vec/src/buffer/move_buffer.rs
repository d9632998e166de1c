use std::marker::PhantomData;
use std::ptr::NonNull;

use grove_common::{Error, Result};

use super::{RawBuffer, SlotState, move_each, sealed, shift_each};
use crate::raw_alloc;

/// General buffer strategy, safe for every element type.
///
/// Growth allocates a new block and moves the live elements into it one at a time,
/// in index order, before releasing the old block. Opening a gap with spare
/// capacity shifts the tail element by element from the back.
///
/// Allocation is always the first step of an operation, and nothing after it can
/// fail, so every growing operation either completes or leaves the buffer as it was.
pub struct MoveBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for MoveBuffer<T> {}

unsafe impl<T: Sync> Sync for MoveBuffer<T> {}

impl<T> MoveBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> MoveBuffer<T> {
        MoveBuffer {
            ptr: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    fn replace_block(&mut self, ptr: NonNull<T>, capacity: usize) {
        unsafe { raw_alloc::release(self.ptr, self.capacity) };
        self.ptr = ptr;
        self.capacity = capacity;
    }
}

impl<T> sealed::Sealed for MoveBuffer<T> {}

impl<T> RawBuffer<T> for MoveBuffer<T> {
    const RELOCATES: bool = false;

    fn new() -> Self {
        MoveBuffer::new()
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        let ptr = raw_alloc::allocate::<T>(capacity)?;
        Ok(MoveBuffer {
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

    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        let new_ptr = raw_alloc::allocate::<T>(new_capacity)?;
        log::trace!(
            "MoveBuffer: reallocating {} -> {} slots, {} live",
            self.capacity,
            new_capacity,
            self.len
        );
        self.truncate(new_capacity);
        unsafe { move_each(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len) };
        self.replace_block(new_ptr, new_capacity);
        Ok(())
    }

    fn shift_right(&mut self, offset: usize, count: usize) -> Result<SlotState> {
        let len = self.len;
        assert!(offset <= len, "shift offset {offset} beyond length {len}");
        let needed = len
            .checked_add(count)
            .ok_or_else(|| Error::capacity_overflow(count))?;

        if needed <= self.capacity {
            self.len = offset;
            if offset == len {
                return Ok(SlotState::Uninit);
            }
            unsafe { shift_each(self.ptr.as_ptr(), len, offset, count) };
            return Ok(SlotState::Vacated);
        }

        let new_ptr = raw_alloc::allocate::<T>(needed)?;
        log::trace!(
            "MoveBuffer: reallocating {} -> {needed} slots to open {count} slots at {offset}",
            self.capacity
        );
        unsafe {
            let src = self.ptr.as_ptr();
            let dst = new_ptr.as_ptr();
            move_each(src, dst, offset);
            move_each(src.add(offset), dst.add(offset + count), len - offset);
        }
        self.len = offset;
        self.replace_block(new_ptr, needed);
        Ok(SlotState::Uninit)
    }

    unsafe fn relocate_into(&mut self, slot: usize, src: *const T, count: usize) {
        debug_assert!(slot + count <= self.capacity);
        unsafe { move_each(src, self.ptr.as_ptr().add(slot), count) };
    }

    fn take(&mut self) -> Self {
        std::mem::replace(self, MoveBuffer::new())
    }
}

impl<T> Drop for MoveBuffer<T> {
    fn drop(&mut self) {
        self.truncate(0);
        unsafe { raw_alloc::release(self.ptr, self.capacity) };
    }
}

impl<T> Default for MoveBuffer<T> {
    fn default() -> Self {
        MoveBuffer::new()
    }
}

impl<T> std::fmt::Debug for MoveBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveBuffer")
            .field("len", &self.len)
            .field("cap", &self.capacity)
            .finish_non_exhaustive()
    }
}
