//! Slot-block allocation on top of the global allocator.
//!
//! All functions work in units of slots of `T` rather than bytes. Requests whose
//! byte size is zero (no slots, or a zero-sized `T`) never reach the allocator and
//! are represented by a dangling, well-aligned pointer.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use grove_common::{Error, Result};

/// Returns the layout of a block holding `capacity` slots of `T`.
#[inline]
pub fn slot_layout<T>(capacity: usize) -> Result<Layout> {
    Layout::array::<T>(capacity).map_err(|_| Error::capacity_overflow(capacity))
}

/// Allocates an uninitialized block of `capacity` slots for `T`.
pub fn allocate<T>(capacity: usize) -> Result<NonNull<T>> {
    let layout = slot_layout::<T>(capacity)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    log::trace!(
        "allocating {capacity} slots ({} bytes, align {})",
        layout.size(),
        layout.align()
    );
    let ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or_else(|| Error::alloc_failed(layout))
}

/// Releases a block previously obtained from [`allocate`] or [`reallocate`].
///
/// # Safety
///
/// `ptr` must have been returned by this module for exactly `capacity` slots of `T`,
/// and must not be used afterwards. The block must not hold live values that still
/// need dropping.
pub unsafe fn release<T>(ptr: NonNull<T>, capacity: usize) {
    let Ok(layout) = slot_layout::<T>(capacity) else {
        return;
    };
    if layout.size() != 0 {
        unsafe {
            alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

/// Resizes a block in one step, preserving the bytes of the first
/// `min(old_capacity, new_capacity)` slots.
///
/// On failure the original block is left untouched and still owned by the caller.
///
/// # Safety
///
/// `ptr` must have been returned by this module for exactly `old_capacity` slots of `T`.
/// On success the old pointer must no longer be used.
pub unsafe fn reallocate<T>(
    ptr: NonNull<T>,
    old_capacity: usize,
    new_capacity: usize,
) -> Result<NonNull<T>> {
    let new_layout = slot_layout::<T>(new_capacity)?;
    let old_layout = slot_layout::<T>(old_capacity)?;
    match (old_layout.size(), new_layout.size()) {
        (0, _) => allocate::<T>(new_capacity),
        (_, 0) => {
            unsafe { release(ptr, old_capacity) };
            Ok(NonNull::dangling())
        }
        (old_size, new_size) => {
            log::trace!("reallocating block of {old_size} bytes to {new_size} bytes");
            let p = unsafe { alloc::realloc(ptr.as_ptr().cast::<u8>(), old_layout, new_size) };
            NonNull::new(p.cast::<T>()).ok_or_else(|| Error::alloc_failed(new_layout))
        }
    }
}

/// Unwraps the result of a growth request, escalating failures the way `std`
/// collections do: allocation failure goes to `handle_alloc_error`, anything else
/// panics.
#[inline]
pub(crate) fn infallible<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => raise(e),
    }
}

#[cold]
#[inline(never)]
fn raise(e: Error) -> ! {
    match e.layout() {
        Some(layout) => alloc::handle_alloc_error(layout),
        None => panic!("{e}"),
    }
}
