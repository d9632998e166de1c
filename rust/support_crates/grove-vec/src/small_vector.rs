//! Vectors that keep their first elements inline.

use crate::Vector;
use crate::buffer::{InlineBuffer, MoveBuffer, RawBuffer, RelocateBuffer};

/// A [`Vector`] that stores up to `N` elements inside the vector itself and spills
/// to a heap block of strategy `B` when it outgrows them.
///
/// Once spilled, the vector stays on the heap for the rest of its life.
///
/// ```
/// use grove_vec::{SmallVector, Vector};
///
/// let mut v: SmallVector<u32, 2> = Vector::new();
/// v.push(1);
/// v.push(2);
/// assert!(v.is_inline());
/// v.push(3);
/// assert!(!v.is_inline());
/// assert_eq!(v, [1, 2, 3]);
/// ```
pub type SmallVector<T, const N: usize, B = MoveBuffer<T>> = Vector<T, InlineBuffer<T, N, B>>;

/// A [`SmallVector`] whose inline and heap storage both use bulk relocation.
pub type SmallRelocVector<T, const N: usize> = SmallVector<T, N, RelocateBuffer<T>>;

impl<T, const N: usize, B: RawBuffer<T>> Vector<T, InlineBuffer<T, N, B>> {
    /// Number of elements that fit inline.
    pub const INLINE_CAPACITY: usize = N;

    /// Returns `true` while the elements are stored inline.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.buffer().is_inline()
    }
}
