//! The growable array built on top of a [`RawBuffer`] strategy.

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::{ptr, slice};

use grove_common::result::verify_index;
use grove_common::{Error, Result};

use crate::buffer::{MoveBuffer, RawBuffer, RelocateBuffer};
use crate::growth;
use crate::into_iter::IntoIter;
use crate::raw_alloc::infallible;

/// A contiguous growable array, conceptually similar to a `Vec<T>`, whose storage
/// management is delegated to the buffer strategy `B`.
///
/// The default strategy, [`MoveBuffer`], works for every element type. For
/// [`Relocatable`](grove_common_traits::Relocatable) element types,
/// [`RelocVector`] grows with a single `realloc` and inserts with a single
/// `memmove`. [`SmallVector`](crate::SmallVector) keeps its first elements inline.
///
/// # Growth
///
/// Appending to a full vector grows the capacity to
/// `max(capacity * 1.5 + 4, needed)`. Construction from a count or a slice,
/// `resize` and `reserve` allocate exactly what is asked for; only `shrink_to_fit`
/// ever releases capacity.
///
/// # Failure
///
/// Every growing operation leaves the vector exactly as it was when allocation fails.
/// `try_with_capacity`, `try_reserve`, `try_shrink_to_fit`, `try_push`, `try_emplace`
/// and `try_insert` report such failures as an [`Error`]; all other operations
/// escalate them like `std` collections do.
pub struct Vector<T, B = MoveBuffer<T>> {
    buf: B,
    _marker: PhantomData<T>,
}

/// A vector using the bulk [`RelocateBuffer`] strategy.
pub type RelocVector<T> = Vector<T, RelocateBuffer<T>>;

impl<T, B: RawBuffer<T>> Vector<T, B> {
    /// Creates a new empty vector. Heap strategies do not allocate.
    pub fn new() -> Self {
        Vector {
            buf: B::new(),
            _marker: PhantomData,
        }
    }

    /// Creates a new empty vector able to hold `capacity` elements without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Fallible form of [`Vector::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Vector {
            buf: B::with_capacity(capacity)?,
            _marker: PhantomData,
        })
    }

    /// Creates a vector of `count` elements, the `i`-th built by `f(i)`.
    /// The capacity is exactly `count`.
    pub fn from_fn<F>(count: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut v = Self::with_capacity(count);
        for i in 0..count {
            let value = f(i);
            unsafe { v.push_unchecked(value) };
        }
        v
    }

    /// Creates a vector holding `count` copies of `value`.
    /// The capacity is exactly `count`.
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(count);
        v.extend_with(count, value);
        v
    }

    /// Creates a vector of `count` default-constructed elements.
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(count, |_| T::default())
    }

    /// Creates a vector holding a copy of every element of `items`.
    /// The capacity is exactly `items.len()`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(items.len());
        v.extend_from_slice(items);
        v
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &B {
        &self.buf
    }

    /// Returns a pointer to the first slot. Never null, even for an empty vector.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable form of [`Vector::as_ptr`].
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.buf.len()) }
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.buf.len();
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), len) }
    }

    /// Returns the element at `index`, or [`Error::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index(index, self.len())?;
        Ok(unsafe { self.as_slice().get_unchecked(index) })
    }

    /// Mutable form of [`Vector::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index(index, self.len())?;
        Ok(unsafe { self.as_mut_slice().get_unchecked_mut(index) })
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn front(&self) -> &T {
        assert!(!self.is_empty(), "front() called on an empty vector");
        &self.as_slice()[0]
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn back(&self) -> &T {
        assert!(!self.is_empty(), "back() called on an empty vector");
        &self.as_slice()[self.len() - 1]
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn front_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "front_mut() called on an empty vector");
        &mut self.as_mut_slice()[0]
    }

    /// Returns the last element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    pub fn back_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "back_mut() called on an empty vector");
        let last = self.len() - 1;
        &mut self.as_mut_slice()[last]
    }

    /// Ensures the total capacity is at least `capacity`. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        infallible(self.try_reserve(capacity))
    }

    /// Fallible form of [`Vector::reserve`].
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity > self.capacity() {
            self.buf.reallocate(capacity)?;
        }
        Ok(())
    }

    /// Releases unused capacity.
    ///
    /// Inline storage keeps its fixed capacity; a heap block is resized to the
    /// current length.
    pub fn shrink_to_fit(&mut self) {
        infallible(self.try_shrink_to_fit())
    }

    /// Fallible form of [`Vector::shrink_to_fit`].
    pub fn try_shrink_to_fit(&mut self) -> Result<()> {
        let len = self.len();
        if len < self.capacity() {
            self.buf.reallocate(len)?;
        }
        Ok(())
    }

    /// Drops the elements from `new_len` onwards. Keeps the capacity.
    pub fn truncate(&mut self, new_len: usize) {
        self.buf.truncate(new_len);
    }

    /// Drops all elements. Keeps the capacity.
    pub fn clear(&mut self) {
        self.buf.truncate(0);
    }

    /// Resizes the vector to `new_len` elements.
    ///
    /// Growing first makes room for exactly `new_len` elements if needed, then fills
    /// the new slots with copies of `value`. Shrinking drops the trailing elements
    /// and keeps the capacity.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        if new_len > self.capacity() {
            infallible(self.buf.reallocate(new_len));
        }
        self.extend_with(new_len - len, value);
    }

    /// Like [`Vector::resize`], building each new element with `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        if new_len > self.capacity() {
            infallible(self.buf.reallocate(new_len));
        }
        for _ in len..new_len {
            let value = f();
            unsafe { self.push_unchecked(value) };
        }
    }

    /// Appends an element.
    pub fn push(&mut self, value: T) {
        infallible(self.try_push(value));
    }

    /// Appends an element, reporting allocation failure instead of escalating it.
    /// On error the vector is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<()> {
        self.grow_for(1)?;
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Appends the element built by `f` and returns a reference to it.
    ///
    /// Room is made before `f` runs. If `f` panics, the length is unchanged and no
    /// other element is affected.
    pub fn emplace<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        infallible(self.grow_for(1));
        let len = self.len();
        unsafe {
            self.buf.construct_with(len, f);
            self.buf.set_len(len + 1);
            &mut *self.buf.as_mut_ptr().add(len)
        }
    }

    /// Appends the element built by a fallible constructor.
    ///
    /// Allocation failure and constructor failure are both reported through `E`;
    /// in either case the length is unchanged.
    pub fn try_emplace<E, F>(&mut self, f: F) -> std::result::Result<&mut T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: From<Error>,
    {
        self.grow_for(1)?;
        let value = f()?;
        Ok(unsafe { self.push_unchecked(value) })
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    /// Keeps the capacity.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        unsafe {
            self.buf.set_len(len - 1);
            Some(self.buf.as_ptr().add(len - 1).read())
        }
    }

    /// Inserts `value` at `index`, shifting the elements after it to the right,
    /// and returns a reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        infallible(self.try_insert(index, value))
    }

    /// Fallible form of [`Vector::insert`]. On error the vector is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        let len = self.check_insert_index(index);
        let state = self.buf.shift_right(index, 1)?;
        debug_assert!(!state.is_vacated() || index < len);
        // A vacated slot owns nothing, so both slot states take a plain write.
        unsafe {
            self.buf.construct(index, value);
            self.buf.set_len(len + 1);
            Ok(&mut *self.buf.as_mut_ptr().add(index))
        }
    }

    /// Inserts the element built by `f` at `index`. The element is built before
    /// anything is shifted, so a panicking `f` leaves the vector untouched.
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.check_insert_index(index);
        let value = f();
        self.insert(index, value)
    }

    /// Inserts `count` copies of `value` at `index`, with a single shift.
    ///
    /// The copies are written straight into the opened gap. If a `clone` panics,
    /// the copies made so far are dropped and the vector is restored.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        self.check_insert_index(index);
        if count == 0 {
            return;
        }
        let mut gap = infallible(GapFill::open(&mut self.buf, index, count));
        for _ in 1..count {
            gap.write(value.clone());
        }
        gap.write(value);
        gap.finish();
    }

    /// Inserts copies of `items` at `index`, with a single shift.
    ///
    /// If a `clone` panics, the copies made so far are dropped and the vector is
    /// restored.
    pub fn insert_slice(&mut self, index: usize, items: &[T])
    where
        T: Clone,
    {
        self.check_insert_index(index);
        if items.is_empty() {
            return;
        }
        let mut gap = infallible(GapFill::open(&mut self.buf, index, items.len()));
        for item in items {
            gap.write(item.clone());
        }
        gap.finish();
    }

    /// Inserts the items of `iter` at `index`.
    ///
    /// An iterator with an exact size hint is drained straight into a gap opened
    /// with a single shift. Other iterators are collected into a temporary block
    /// first. Either way a panicking iterator leaves the vector unchanged.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index);
        let mut iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        if upper != Some(lower) {
            let staged: Vector<T> = iter.collect();
            infallible(self.splice_staged(index, staged));
            return;
        }

        let mut end = index;
        if lower > 0 {
            let mut gap = infallible(GapFill::open(&mut self.buf, index, lower));
            while !gap.is_full() {
                let Some(item) = iter.next() else {
                    break;
                };
                gap.write(item);
            }
            end = gap.finish();
        }
        // Items beyond the announced length.
        for item in iter {
            self.insert(end, item);
            end += 1;
        }
    }

    /// Replaces the content with the items of `iter`.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.extend(iter);
    }

    /// Replaces the content with copies of `items`.
    pub fn assign_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.clear();
        self.extend_from_slice(items);
    }

    /// Replaces the content with `count` copies of `value`.
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        if count > self.capacity() {
            infallible(self.buf.reallocate(count));
        }
        self.extend_with(count, value);
    }

    /// Appends copies of every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        infallible(self.grow_for(items.len()));
        for item in items {
            unsafe { self.push_unchecked(item.clone()) };
        }
    }

    /// Exchanges the contents of two vectors.
    pub fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Moves the content out into a new vector, leaving `self` valid and empty.
    ///
    /// Heap storage changes owner without touching any element, and `self` is left
    /// without capacity. Inline storage cannot change owner, so its elements are
    /// moved one by one and `self` keeps its empty inline block.
    pub fn take(&mut self) -> Self {
        Vector {
            buf: self.buf.take(),
            _marker: PhantomData,
        }
    }

    /// Replaces the content of `self` with the content of `other`, leaving `other`
    /// valid and empty. The previous elements of `self` are dropped.
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }
}

impl<T, B: RawBuffer<T>> Vector<T, B> {
    /// Makes room for `additional` more elements following the growth policy.
    fn grow_for(&mut self, additional: usize) -> Result<()> {
        let needed = self
            .len()
            .checked_add(additional)
            .ok_or_else(|| Error::capacity_overflow(additional))?;
        let capacity = self.capacity();
        if needed <= capacity {
            return Ok(());
        }
        self.buf
            .reallocate(growth::grown_capacity(capacity, needed))
    }

    /// # Safety
    ///
    /// The length must be less than the capacity.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) -> &mut T {
        let len = self.buf.len();
        debug_assert!(len < self.buf.capacity());
        unsafe {
            self.buf.construct(len, value);
            self.buf.set_len(len + 1);
            &mut *self.buf.as_mut_ptr().add(len)
        }
    }

    /// Appends `count` copies of `value`; the capacity must already suffice.
    fn extend_with(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        debug_assert!(self.len() + count <= self.capacity());
        if count == 0 {
            return;
        }
        for _ in 1..count {
            unsafe { self.push_unchecked(value.clone()) };
        }
        unsafe { self.push_unchecked(value) };
    }

    fn check_insert_index(&self, index: usize) -> usize {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        len
    }

    /// Opens a gap at `index` and moves the staged elements of an iterator with
    /// unknown length into it.
    fn splice_staged(&mut self, index: usize, mut staged: Vector<T>) -> Result<()> {
        let len = self.len();
        let count = staged.len();
        if count == 0 {
            return Ok(());
        }
        self.buf.shift_right(index, count)?;
        unsafe {
            self.buf.relocate_into(index, staged.as_ptr(), count);
            staged.buf.set_len(0);
            self.buf.set_len(len + count);
        }
        Ok(())
    }
}

/// A gap opened by [`RawBuffer::shift_right`] that is being filled in place.
///
/// Dropped before [`GapFill::finish`], it drops the values written so far, moves the
/// tail back down and restores the length the buffer had before the shift.
struct GapFill<'a, T, B: RawBuffer<T>> {
    buf: &'a mut B,
    index: usize,
    count: usize,
    tail: usize,
    filled: usize,
    _marker: PhantomData<T>,
}

impl<'a, T, B: RawBuffer<T>> GapFill<'a, T, B> {
    fn open(buf: &'a mut B, index: usize, count: usize) -> Result<Self> {
        let len = buf.len();
        let state = buf.shift_right(index, count)?;
        debug_assert!(!state.is_vacated() || index < len);
        Ok(GapFill {
            buf,
            index,
            count,
            tail: len - index,
            filled: 0,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.filled == self.count
    }

    /// Writes the next value into the gap. Vacated and uninitialized slots own
    /// nothing, so both take a plain write.
    #[inline]
    fn write(&mut self, value: T) {
        assert!(!self.is_full(), "gap of {} slots already filled", self.count);
        unsafe { self.buf.construct(self.index + self.filled, value) };
        self.filled += 1;
    }

    /// Keeps the written values, closes the unfilled rest of the gap and returns
    /// the index just past the last written value.
    fn finish(self) -> usize {
        let mut this = std::mem::ManuallyDrop::new(self);
        let end = this.index + this.filled;
        unsafe {
            this.move_tail(end);
            let new_len = end + this.tail;
            this.buf.set_len(new_len);
        }
        end
    }

    /// # Safety
    ///
    /// The slots `[to, index + count)` must own nothing.
    unsafe fn move_tail(&mut self, to: usize) {
        let from = self.index + self.count;
        if to != from {
            let base = self.buf.as_mut_ptr();
            unsafe { ptr::copy(base.add(from), base.add(to), self.tail) };
        }
    }
}

impl<T, B: RawBuffer<T>> Drop for GapFill<'_, T, B> {
    fn drop(&mut self) {
        unsafe {
            // The live length is still `index` here: a panicking destructor leaks the
            // tail instead of dropping it twice.
            let written =
                ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(self.index), self.filled);
            ptr::drop_in_place(written);
            self.move_tail(self.index);
            self.buf.set_len(self.index + self.tail);
        }
    }
}

impl<T: bytemuck::NoUninit, B: RawBuffer<T>> Vector<T, B> {
    /// Returns the live elements as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }
}

impl<T, B: RawBuffer<T>> Default for Vector<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, B: RawBuffer<T>> Clone for Vector<T, B> {
    /// Copies the live elements into fresh storage sized to the live count.
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

impl<T, B: RawBuffer<T>> Deref for Vector<T, B> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, B: RawBuffer<T>> DerefMut for Vector<T, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, B: RawBuffer<T>> AsRef<[T]> for Vector<T, B> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, B: RawBuffer<T>> AsMut<[T]> for Vector<T, B> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, B: RawBuffer<T>> Borrow<[T]> for Vector<T, B> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, B: RawBuffer<T>> BorrowMut<[T]> for Vector<T, B> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, B: RawBuffer<T>> fmt::Debug for Vector<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, B, B2> PartialEq<Vector<U, B2>> for Vector<T, B>
where
    T: PartialEq<U>,
    B: RawBuffer<T>,
    B2: RawBuffer<U>,
{
    fn eq(&self, other: &Vector<U, B2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, B: RawBuffer<T>> PartialEq<[U]> for Vector<T, B> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, B: RawBuffer<T>> PartialEq<&[U]> for Vector<T, B> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, B: RawBuffer<T>, const M: usize> PartialEq<[U; M]> for Vector<T, B> {
    fn eq(&self, other: &[U; M]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, B: RawBuffer<T>> PartialEq<Vec<U>> for Vector<T, B> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, B: RawBuffer<T>> Eq for Vector<T, B> {}

impl<T: PartialOrd, B: RawBuffer<T>> PartialOrd for Vector<T, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, B: RawBuffer<T>> Ord for Vector<T, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, B: RawBuffer<T>> Hash for Vector<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, B: RawBuffer<T>> Extend<T> for Vector<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible(self.grow_for(lower));
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, B: RawBuffer<T>> Extend<&'a T> for Vector<T, B> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        Extend::<T>::extend(self, iter.into_iter().copied());
    }
}

impl<T, B: RawBuffer<T>> FromIterator<T> for Vector<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: Clone, B: RawBuffer<T>> From<&[T]> for Vector<T, B> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T, B: RawBuffer<T>, const M: usize> From<[T; M]> for Vector<T, B> {
    fn from(items: [T; M]) -> Self {
        let mut v = Self::with_capacity(M);
        for item in items {
            unsafe { v.push_unchecked(item) };
        }
        v
    }
}

impl<T, B: RawBuffer<T>> From<Vec<T>> for Vector<T, B> {
    fn from(items: Vec<T>) -> Self {
        let mut v = Self::with_capacity(items.len());
        for item in items {
            unsafe { v.push_unchecked(item) };
        }
        v
    }
}

impl<T, B: RawBuffer<T>> IntoIterator for Vector<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> Self::IntoIter {
        let Vector { buf, .. } = self;
        IntoIter::new(buf)
    }
}

impl<'a, T, B: RawBuffer<T>> IntoIterator for &'a Vector<T, B> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, B: RawBuffer<T>> IntoIterator for &'a mut Vector<T, B> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
