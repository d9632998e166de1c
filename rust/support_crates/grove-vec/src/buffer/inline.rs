use std::mem::MaybeUninit;
use std::ptr;

use grove_common::{Error, Result};

use super::{MoveBuffer, RawBuffer, SlotState, move_each, sealed, shift_bulk, shift_each};

/// A buffer that keeps up to `N` elements in a block embedded in the buffer itself
/// and moves to a heap buffer of strategy `B` once that block is exhausted.
///
/// The provenance of the storage is an enum, so a buffer is either inline or on the
/// heap, never a mix of both. Promotion to the heap is permanent: shrinking a
/// promoted buffer resizes its heap block and never moves the elements back inline.
///
/// While inline, the buffer follows the relocation discipline of `B`: element by
/// element for [`MoveBuffer`], bulk copies for
/// [`RelocateBuffer`](super::RelocateBuffer).
pub struct InlineBuffer<T, const N: usize, B = MoveBuffer<T>> {
    storage: Storage<T, N, B>,
}

enum Storage<T, const N: usize, B> {
    Inline {
        slots: [MaybeUninit<T>; N],
        len: usize,
    },
    Heap(B),
}

impl<T, const N: usize, B> InlineBuffer<T, N, B> {
    /// Returns `true` while the elements live in the embedded block.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline { .. })
    }

    fn inline() -> Self {
        InlineBuffer {
            storage: Storage::Inline {
                slots: [const { MaybeUninit::uninit() }; N],
                len: 0,
            },
        }
    }
}

impl<T, const N: usize, B: RawBuffer<T>> InlineBuffer<T, N, B> {
    /// Moves the inline elements into a new heap buffer of `capacity` slots,
    /// leaving a gap of `gap` slots at `offset`.
    ///
    /// The returned buffer counts `[0, offset)` as live when a gap is opened, all
    /// moved elements otherwise. The inline length is reset to zero.
    fn promote(
        slots: &mut [MaybeUninit<T>; N],
        len: &mut usize,
        capacity: usize,
        offset: usize,
        gap: usize,
    ) -> Result<B> {
        let live = *len;
        debug_assert!(offset <= live);
        let mut heap = B::with_capacity(capacity)?;
        log::debug!(
            "promoting inline buffer ({N} slots, {live} live) to {capacity} heap slots"
        );
        let src = slots.as_ptr().cast::<T>();
        unsafe {
            heap.relocate_into(0, src, offset);
            heap.relocate_into(offset + gap, src.add(offset), live - offset);
            heap.set_len(if gap == 0 { live } else { offset });
        }
        *len = 0;
        Ok(heap)
    }
}

impl<T, const N: usize, B: RawBuffer<T>> sealed::Sealed for InlineBuffer<T, N, B> {}

impl<T, const N: usize, B: RawBuffer<T>> RawBuffer<T> for InlineBuffer<T, N, B> {
    const RELOCATES: bool = B::RELOCATES;

    fn new() -> Self {
        Self::inline()
    }

    fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity <= N {
            return Ok(Self::inline());
        }
        Ok(InlineBuffer {
            storage: Storage::Heap(B::with_capacity(capacity)?),
        })
    }

    #[inline]
    fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline { len, .. } => *len,
            Storage::Heap(heap) => heap.len(),
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline { .. } => N,
            Storage::Heap(heap) => heap.capacity(),
        }
    }

    #[inline]
    unsafe fn set_len(&mut self, new_len: usize) {
        match &mut self.storage {
            Storage::Inline { len, .. } => {
                debug_assert!(new_len <= N);
                *len = new_len;
            }
            Storage::Heap(heap) => unsafe { heap.set_len(new_len) },
        }
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        match &self.storage {
            Storage::Inline { slots, .. } => slots.as_ptr().cast::<T>(),
            Storage::Heap(heap) => heap.as_ptr(),
        }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.storage {
            Storage::Inline { slots, .. } => slots.as_mut_ptr().cast::<T>(),
            Storage::Heap(heap) => heap.as_mut_ptr(),
        }
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        let (slots, len) = match &mut self.storage {
            Storage::Heap(heap) => return heap.reallocate(new_capacity),
            Storage::Inline { slots, len } => (slots, len),
        };
        if new_capacity <= N {
            self.truncate(new_capacity);
            return Ok(());
        }
        let live = *len;
        let heap = Self::promote(slots, len, new_capacity, live, 0)?;
        self.storage = Storage::Heap(heap);
        Ok(())
    }

    fn shift_right(&mut self, offset: usize, count: usize) -> Result<SlotState> {
        let (slots, len) = match &mut self.storage {
            Storage::Heap(heap) => return heap.shift_right(offset, count),
            Storage::Inline { slots, len } => (slots, len),
        };
        let old_len = *len;
        assert!(offset <= old_len, "shift offset {offset} beyond length {old_len}");
        let needed = old_len
            .checked_add(count)
            .ok_or_else(|| Error::capacity_overflow(count))?;

        if needed > N {
            let heap = Self::promote(slots, len, needed, offset, count)?;
            self.storage = Storage::Heap(heap);
            return Ok(SlotState::Uninit);
        }

        *len = offset;
        if offset == old_len {
            return Ok(SlotState::Uninit);
        }
        let base = slots.as_mut_ptr().cast::<T>();
        if B::RELOCATES {
            unsafe { shift_bulk(base, old_len, offset, count) };
            Ok(SlotState::Uninit)
        } else {
            unsafe { shift_each(base, old_len, offset, count) };
            Ok(SlotState::Vacated)
        }
    }

    unsafe fn relocate_into(&mut self, slot: usize, src: *const T, count: usize) {
        match &mut self.storage {
            Storage::Heap(heap) => unsafe { heap.relocate_into(slot, src, count) },
            Storage::Inline { slots, .. } => {
                debug_assert!(slot + count <= N);
                let dst = unsafe { slots.as_mut_ptr().cast::<T>().add(slot) };
                if B::RELOCATES {
                    unsafe { ptr::copy_nonoverlapping(src, dst, count) };
                } else {
                    unsafe { move_each(src, dst, count) };
                }
            }
        }
    }

    /// A heap-backed buffer hands over its block without touching the elements and
    /// is left as an empty heap buffer with no capacity. An inline buffer cannot
    /// give its block away: its elements are moved one by one into the inline block
    /// of the returned buffer, and it keeps its own, now empty, block.
    fn take(&mut self) -> Self {
        match &mut self.storage {
            Storage::Heap(heap) => InlineBuffer {
                storage: Storage::Heap(heap.take()),
            },
            Storage::Inline { slots, len } => {
                let mut moved: [MaybeUninit<T>; N] = [const { MaybeUninit::uninit() }; N];
                let count = *len;
                *len = 0;
                unsafe {
                    move_each(
                        slots.as_ptr().cast::<T>(),
                        moved.as_mut_ptr().cast::<T>(),
                        count,
                    )
                };
                InlineBuffer {
                    storage: Storage::Inline {
                        slots: moved,
                        len: count,
                    },
                }
            }
        }
    }
}

impl<T, const N: usize, B> Drop for InlineBuffer<T, N, B> {
    fn drop(&mut self) {
        if let Storage::Inline { slots, len } = &mut self.storage {
            let count = std::mem::replace(len, 0);
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    slots.as_mut_ptr().cast::<T>(),
                    count,
                ));
            }
        }
    }
}

impl<T, const N: usize, B: RawBuffer<T>> Default for InlineBuffer<T, N, B> {
    fn default() -> Self {
        Self::inline()
    }
}

impl<T, const N: usize, B: RawBuffer<T>> std::fmt::Debug for InlineBuffer<T, N, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineBuffer")
            .field("inline", &self.is_inline())
            .field("len", &self.len())
            .field("cap", &self.capacity())
            .finish_non_exhaustive()
    }
}
