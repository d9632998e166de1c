use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;

use crate::buffer::RawBuffer;

/// An owning iterator over the elements of a [`Vector`](crate::Vector).
///
/// Elements not yielded are dropped together with the iterator.
pub struct IntoIter<T, B: RawBuffer<T>> {
    buf: B,
    start: usize,
    end: usize,
    _marker: PhantomData<T>,
}

impl<T, B: RawBuffer<T>> IntoIter<T, B> {
    pub(crate) fn new(mut buf: B) -> Self {
        let end = buf.len();
        // The iterator owns the slots [start, end) from here on.
        unsafe { buf.set_len(0) };
        IntoIter {
            buf,
            start: 0,
            end,
            _marker: PhantomData,
        }
    }

    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, B: RawBuffer<T>> Iterator for IntoIter<T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let value = unsafe { self.buf.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, B: RawBuffer<T>> DoubleEndedIterator for IntoIter<T, B> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.buf.as_ptr().add(self.end).read() })
    }
}

impl<T, B: RawBuffer<T>> ExactSizeIterator for IntoIter<T, B> {}

impl<T, B: RawBuffer<T>> FusedIterator for IntoIter<T, B> {}

impl<T, B: RawBuffer<T>> Drop for IntoIter<T, B> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        unsafe {
            let tail = std::ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(start), remaining);
            std::ptr::drop_in_place(tail);
        }
    }
}

impl<T: fmt::Debug, B: RawBuffer<T>> fmt::Debug for IntoIter<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
