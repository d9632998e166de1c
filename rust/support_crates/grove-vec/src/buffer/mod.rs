//! Raw storage strategies behind [`Vector`](crate::Vector).
//!
//! A buffer owns one contiguous block of slots and tracks how many of them, counted
//! from the start, hold live values. It knows how to grow or shrink the block and how
//! to open a gap in the middle of the live range, but it enforces nothing beyond
//! that: a buffer is a tool for building a safe vector, not a safe vector itself.
//!
//! Three strategies share the [`RawBuffer`] contract:
//!
//! - [`MoveBuffer`]: works for any element type. Elements are relocated one at a
//!   time into freshly allocated blocks.
//! - [`RelocateBuffer`]: requires [`Relocatable`](grove_common_traits::Relocatable)
//!   elements. Growth is a single `realloc` and gaps are opened with a single
//!   `memmove`.
//! - [`InlineBuffer`]: starts with a fixed block embedded in the buffer itself and
//!   promotes to a heap buffer of either strategy once that block is exhausted.
//!
//! # Slot states
//!
//! Every slot in `[0, capacity)` is either live (inside `[0, len)`) or empty. The
//! empty slots of a freshly opened gap come in two flavors, reported by
//! [`RawBuffer::shift_right`] as a [`SlotState`]. Neither flavor owns a value, so
//! both are filled with [`RawBuffer::construct`].

use std::ptr;

use grove_common::Result;

mod inline;
mod move_buffer;
mod relocate_buffer;

pub use inline::InlineBuffer;
pub use move_buffer::MoveBuffer;
pub use relocate_buffer::RelocateBuffer;

/// State of the slots in a gap opened by [`RawBuffer::shift_right`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// The slots have not held a value since the block was allocated, or the block
    /// was replaced while opening the gap.
    Uninit,
    /// The slots lie inside the previous live range. They hold stale bit-copies of
    /// elements that were moved further right and own nothing.
    Vacated,
}

impl SlotState {
    /// Returns `true` if the gap lies inside the previous live range.
    #[inline]
    pub fn is_vacated(self) -> bool {
        self == SlotState::Vacated
    }
}

mod sealed {
    pub trait Sealed {}
}

/// The storage-strategy contract shared by all buffers.
///
/// The trait is sealed: the set of strategies is fixed by this crate, and the
/// strategy of a vector is chosen through its buffer type parameter.
pub trait RawBuffer<T>: Sized + sealed::Sealed {
    /// `true` if the strategy moves runs of elements by raw byte copy.
    const RELOCATES: bool;

    /// Creates an empty buffer. Heap strategies do not allocate.
    fn new() -> Self;

    /// Creates an empty buffer able to hold at least `capacity` elements.
    fn with_capacity(capacity: usize) -> Result<Self>;

    /// Number of live elements.
    fn len(&self) -> usize;

    /// Number of slots in the current block.
    fn capacity(&self) -> usize;

    /// Sets the number of live elements.
    ///
    /// # Safety
    ///
    /// `len` must not exceed the capacity, and the slots `[0, len)` must hold
    /// live values. Values in slots cut off by a smaller `len` are forgotten, not
    /// dropped.
    unsafe fn set_len(&mut self, len: usize);

    /// Pointer to the first slot. Never null, even for an empty buffer.
    fn as_ptr(&self) -> *const T;

    /// Mutable pointer to the first slot. Never null, even for an empty buffer.
    fn as_mut_ptr(&mut self) -> *mut T;

    /// Replaces the block with one of exactly `new_capacity` slots.
    ///
    /// Elements beyond `new_capacity` are dropped first; the survivors are moved
    /// into the new block. When `new_capacity >= len` the operation offers the
    /// strong guarantee: on error the buffer is unchanged.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()>;

    /// Opens a gap of `count` empty slots at `offset`.
    ///
    /// The elements `[offset, len)` end up at `[offset + count, len + count)`. If
    /// the block is too small, it is replaced by one of exactly `len + count` slots.
    ///
    /// On return the live length is `offset`: the gap and the shifted tail are not
    /// counted. The caller fills the gap and then restores the length with
    /// `set_len(len + count)`. Should the caller give up in between, the tail is
    /// leaked rather than dropped twice.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    fn shift_right(&mut self, offset: usize, count: usize) -> Result<SlotState>;

    /// Moves `count` elements from `src` into the slots starting at `slot`, using
    /// the strategy's own relocation discipline. The live length is not changed.
    ///
    /// # Safety
    ///
    /// `src` must point to `count` live values that the caller gives up: they must
    /// not be used or dropped afterwards. The slots `[slot, slot + count)` must lie
    /// within the capacity, hold no live values, and not overlap `src`.
    unsafe fn relocate_into(&mut self, slot: usize, src: *const T, count: usize);

    /// Moves the whole content out into a new buffer, leaving `self` valid and
    /// empty.
    fn take(&mut self) -> Self;

    /// Writes `value` into an empty slot.
    ///
    /// # Safety
    ///
    /// `slot` must be within the capacity and must not hold a live value.
    #[inline]
    unsafe fn construct(&mut self, slot: usize, value: T) {
        unsafe { self.as_mut_ptr().add(slot).write(value) }
    }

    /// Builds a value with `f` and writes it into an empty slot. If `f` panics,
    /// the slot stays empty.
    ///
    /// # Safety
    ///
    /// Same as [`RawBuffer::construct`].
    #[inline]
    unsafe fn construct_with<F>(&mut self, slot: usize, f: F)
    where
        F: FnOnce() -> T,
    {
        let value = f();
        unsafe { self.construct(slot, value) }
    }

    /// Drops the value in a live slot, leaving it empty.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value, and the caller must stop counting it as live.
    #[inline]
    unsafe fn destruct(&mut self, slot: usize) {
        unsafe { ptr::drop_in_place(self.as_mut_ptr().add(slot)) }
    }

    /// Drops the live elements from `new_len` onwards. Does nothing if `new_len`
    /// is not less than the current length.
    fn truncate(&mut self, new_len: usize) {
        let len = self.len();
        if new_len >= len {
            return;
        }
        unsafe {
            // The length goes first: a panicking destructor must not lead to the
            // remaining tail being dropped again later.
            self.set_len(new_len);
            let tail = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(new_len), len - new_len);
            ptr::drop_in_place(tail);
        }
    }
}

/// Moves `count` values from `src` to `dst` one element at a time, in index order.
///
/// # Safety
///
/// `src` must hold `count` live values that are given up; `dst` must be valid for
/// `count` writes and must not overlap `src`.
#[inline]
pub(crate) unsafe fn move_each<T>(src: *const T, dst: *mut T, count: usize) {
    for i in 0..count {
        unsafe { dst.add(i).write(src.add(i).read()) };
    }
    probe::record_moves(count);
}

/// Shifts `[offset, len)` right by `count` within one block, one element at a
/// time, starting from the back so that no value is overwritten before it is read.
///
/// # Safety
///
/// The block at `base` must have room for `len + count` slots, and `[0, len)` must
/// hold live values.
#[inline]
pub(crate) unsafe fn shift_each<T>(base: *mut T, len: usize, offset: usize, count: usize) {
    for i in (offset..len).rev() {
        unsafe { base.add(i + count).write(base.add(i).read()) };
    }
    probe::record_moves(len - offset);
}

/// Shifts `[offset, len)` right by `count` within one block with a single `memmove`.
///
/// # Safety
///
/// Same as [`shift_each`].
#[inline]
pub(crate) unsafe fn shift_bulk<T>(base: *mut T, len: usize, offset: usize, count: usize) {
    unsafe { ptr::copy(base.add(offset), base.add(offset + count), len - offset) };
}


#[cfg(not(test))]
pub(crate) mod probe {
    #[inline(always)]
    pub(crate) fn record_moves(_count: usize) {}
}
