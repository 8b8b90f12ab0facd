use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::SpanError;
use crate::fatal::raise;

/// Converts a position to `isize`, saturating for zero-sized elements.
#[inline(always)]
const fn signed(n: usize) -> isize {
    if n > isize::MAX as usize { isize::MAX } else { n as isize }
}

// -----------------------------------------------------------------------------
// Iter

/// A random-access iterator bound to the span it was created from.
///
/// `Iter` is a normal Rust iterator yielding `&'a T`, and also a cursor:
/// its [`position`](Self::position) can be moved with `+`/`-`, read with
/// [`get`](Self::get), subtracted from another cursor and compared with it.
///
/// The position always stays within `[0, len]`. Moving outside that range,
/// or reading at `len`, is a fatal violation.
///
/// # Examples
///
/// ```
/// use xs_span::Span;
///
/// let arr = [10, 11, 12, 13];
/// let s = Span::<i32>::from_array(&arr);
///
/// let mut it = s.begin();
/// it += 2;
/// assert_eq!(*it.get(), 12);
/// assert_eq!(s.end() - it.clone(), 2);
/// assert!(it < s.end());
///
/// assert_eq!(it.copied().collect::<Vec<_>>(), [12, 13]);
/// ```
pub struct Iter<'a, T> {
    ptr: *const T,
    len: usize,
    index: usize,
    back: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            len: self.len,
            index: self.index,
            back: self.back,
            _marker: PhantomData,
        }
    }
}

// SAFETY: `Iter` behaves like `core::slice::Iter`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}

// SAFETY: `Iter` behaves like `core::slice::Iter`.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) const fn new(ptr: *const T, len: usize, index: usize) -> Self {
        Self {
            ptr,
            len,
            index,
            back: len,
            _marker: PhantomData,
        }
    }

    /// Returns the distance from the start of the originating span.
    #[inline]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// Returns the length of the originating span.
    #[inline]
    pub const fn span_len(&self) -> usize {
        self.len
    }

    /// Returns the element under the cursor.
    ///
    /// # Panics
    ///
    /// The cursor is at the end of the span.
    #[track_caller]
    pub fn get(&self) -> &'a T {
        span_check!(
            self.index < self.len,
            SpanError::IteratorOutOfRange {
                position: signed(self.index),
                len: self.len,
            }
        );
        // SAFETY: `index < len`, so the pointer is non-null and in bounds.
        unsafe { &*self.ptr.add(self.index) }
    }

    /// Moves the cursor one element forward.
    #[track_caller]
    pub fn increment(&mut self) {
        self.seek(1);
    }

    /// Moves the cursor one element backward.
    #[track_caller]
    pub fn decrement(&mut self) {
        self.seek(-1);
    }

    /// Returns `self.position() - other.position()`.
    ///
    /// The magnitude saturates at `isize::MAX`, which only zero-sized
    /// elements can reach.
    ///
    /// # Panics
    ///
    /// With the `debug` feature in a debug build: the iterators come from
    /// different spans.
    #[track_caller]
    pub fn distance(&self, other: &Self) -> isize {
        self.check_origin(other);
        if self.index >= other.index {
            signed(self.index - other.index)
        } else {
            -signed(other.index - self.index)
        }
    }

    #[track_caller]
    pub(crate) fn seek(&mut self, delta: isize) {
        match self.index.checked_add_signed(delta) {
            Some(index) if index <= self.len => self.index = index,
            _ => raise(SpanError::IteratorOutOfRange {
                position: signed(self.index).saturating_add(delta),
                len: self.len,
            }),
        }
    }

    #[track_caller]
    pub(crate) fn seek_back(&mut self, delta: isize) {
        match delta.checked_neg() {
            Some(delta) => self.seek(delta),
            None => raise(SpanError::IteratorOutOfRange {
                position: isize::MIN,
                len: self.len,
            }),
        }
    }

    #[track_caller]
    #[cfg_attr(not(all(debug_assertions, feature = "debug")), inline(always))]
    #[cfg_attr(not(all(debug_assertions, feature = "debug")), expect(unused_variables))]
    pub(crate) fn check_origin(&self, other: &Self) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        span_check!(
            self.ptr == other.ptr && self.len == other.len,
            SpanError::OriginMismatch
        );
    }

    /// Reads the element at `index` of the originating span.
    ///
    /// # Safety
    ///
    /// `index < self.len`.
    #[inline(always)]
    pub(crate) unsafe fn read_at(&self, index: usize) -> &'a T {
        // SAFETY: The caller guarantees `index < len`.
        unsafe { &*self.ptr.add(index) }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.index < self.back {
            // SAFETY: `index < back <= len`.
            let item = unsafe { self.read_at(self.index) };
            self.index += 1;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.index);
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index < self.back {
            self.back -= 1;
            // SAFETY: `back < len`.
            Some(unsafe { self.read_at(self.back) })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Add<isize> for Iter<'_, T> {
    type Output = Self;

    #[track_caller]
    fn add(mut self, rhs: isize) -> Self {
        self.seek(rhs);
        self
    }
}

impl<T> Sub<isize> for Iter<'_, T> {
    type Output = Self;

    #[track_caller]
    fn sub(mut self, rhs: isize) -> Self {
        self.seek_back(rhs);
        self
    }
}

impl<T> AddAssign<isize> for Iter<'_, T> {
    #[track_caller]
    fn add_assign(&mut self, rhs: isize) {
        self.seek(rhs);
    }
}

impl<T> SubAssign<isize> for Iter<'_, T> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: isize) {
        self.seek_back(rhs);
    }
}

impl<T> Sub for Iter<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, rhs: Self) -> isize {
        self.distance(&rhs)
    }
}

impl<T> PartialEq for Iter<'_, T> {
    #[track_caller]
    fn eq(&self, other: &Self) -> bool {
        self.check_origin(other);
        self.index == other.index
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> PartialOrd for Iter<'_, T> {
    #[track_caller]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Iter<'_, T> {
    #[track_caller]
    fn cmp(&self, other: &Self) -> Ordering {
        self.check_origin(other);
        self.index.cmp(&other.index)
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("position", &self.index)
            .field("len", &self.len)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// RevIter

/// The reversing adaptor of [`Iter`].
///
/// Wraps a forward base iterator and reads the element just before it, so
/// reverse position `p` refers to element `len - 1 - p`.
/// [`Span::rbegin`](crate::Span::rbegin) wraps `end()` and
/// [`Span::rend`](crate::Span::rend) wraps `begin()`.
///
/// # Examples
///
/// ```
/// use xs_span::Span;
///
/// let arr = [0, 1, 2, 3];
/// let s = Span::<i32>::from_array(&arr);
///
/// let it = s.rbegin() + 1;
/// assert_eq!(*it.get(), 2);
/// assert_eq!(s.rend() - s.rbegin(), 4);
///
/// assert_eq!(s.rbegin().copied().collect::<Vec<_>>(), [3, 2, 1, 0]);
/// ```
pub struct RevIter<'a, T> {
    base: Iter<'a, T>,
    stop: usize,
}

impl<T> Clone for RevIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            stop: self.stop,
        }
    }
}

impl<'a, T> RevIter<'a, T> {
    /// Creates a reverse iterator reading the elements before `base`.
    #[inline]
    pub fn new(base: Iter<'a, T>) -> Self {
        Self { base, stop: 0 }
    }

    /// Returns the underlying forward iterator.
    #[inline]
    pub fn base(&self) -> Iter<'a, T> {
        Iter::new(self.base.ptr, self.base.len, self.base.index)
    }

    /// Returns the distance from `rbegin`.
    #[inline]
    pub const fn position(&self) -> usize {
        self.base.len - self.base.index
    }

    /// Returns the element under the cursor.
    ///
    /// # Panics
    ///
    /// The cursor is at `rend`.
    #[track_caller]
    pub fn get(&self) -> &'a T {
        span_check!(
            self.base.index > 0,
            SpanError::IteratorOutOfRange {
                position: signed(self.position()),
                len: self.base.len,
            }
        );
        // SAFETY: `0 < index <= len`.
        unsafe { self.base.read_at(self.base.index - 1) }
    }

    /// Moves the cursor one element towards `rend`.
    #[track_caller]
    pub fn increment(&mut self) {
        self.base.seek(-1);
    }

    /// Moves the cursor one element towards `rbegin`.
    #[track_caller]
    pub fn decrement(&mut self) {
        self.base.seek(1);
    }

    /// Returns `self.position() - other.position()`.
    #[track_caller]
    pub fn distance(&self, other: &Self) -> isize {
        other.base.distance(&self.base)
    }
}

impl<'a, T> Iterator for RevIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.base.index > self.stop {
            self.base.index -= 1;
            // SAFETY: `index < len` after the decrement.
            Some(unsafe { self.base.read_at(self.base.index) })
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.base.index.saturating_sub(self.stop);
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for RevIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.stop < self.base.index {
            let index = self.stop;
            self.stop += 1;
            // SAFETY: `index < base.index <= len`.
            Some(unsafe { self.base.read_at(index) })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for RevIter<'_, T> {}

impl<T> FusedIterator for RevIter<'_, T> {}

impl<T> Add<isize> for RevIter<'_, T> {
    type Output = Self;

    #[track_caller]
    fn add(mut self, rhs: isize) -> Self {
        self.base.seek_back(rhs);
        self
    }
}

impl<T> Sub<isize> for RevIter<'_, T> {
    type Output = Self;

    #[track_caller]
    fn sub(mut self, rhs: isize) -> Self {
        self.base.seek(rhs);
        self
    }
}

impl<T> AddAssign<isize> for RevIter<'_, T> {
    #[track_caller]
    fn add_assign(&mut self, rhs: isize) {
        self.base.seek_back(rhs);
    }
}

impl<T> SubAssign<isize> for RevIter<'_, T> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: isize) {
        self.base.seek(rhs);
    }
}

impl<T> Sub for RevIter<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, rhs: Self) -> isize {
        self.distance(&rhs)
    }
}

impl<T> PartialEq for RevIter<'_, T> {
    #[track_caller]
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T> Eq for RevIter<'_, T> {}

impl<T> PartialOrd for RevIter<'_, T> {
    #[track_caller]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RevIter<'_, T> {
    #[track_caller]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.base, &other.base).reverse()
    }
}

impl<T> fmt::Debug for RevIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevIter")
            .field("position", &self.position())
            .field("len", &self.base.len)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Iter, RevIter};
    use crate::Span;
    use alloc::vec::Vec;
    use core::cmp::Ordering;
    use core::ptr::NonNull;

    fn sequence() -> [f32; 16] {
        core::array::from_fn(|i| i as f32)
    }

    #[test]
    fn is_sync_send() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_send::<Iter<'_, i32>>();
        is_sync::<Iter<'_, i32>>();
        is_unwindsafe::<RevIter<'_, i32>>();
        is_refunwindsafe::<RevIter<'_, i32>>();
    }

    #[test]
    fn construct() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let it = s.begin();
        assert_eq!(it.position(), 0);
        assert_eq!(it.span_len(), 16);
        assert!(it == s.begin());
        assert!(it != s.end());
        assert_eq!(s.end().position(), 16);

        let copy = it.clone();
        assert!(copy == it);
    }

    #[test]
    fn deref() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let it = s.begin();
        assert_eq!(*it.get(), arr[0]);
        assert!(core::ptr::eq(it.get(), &arr[0]));

        let it = s.end() - 1;
        assert_eq!(*it.get(), arr[15]);
    }

    #[test]
    fn calculate() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let mut it = s.begin();
        it.increment();
        assert_eq!(*it.get(), arr[1]);
        it += 3;
        assert_eq!(*it.get(), arr[4]);
        it -= 2;
        assert_eq!(*it.get(), arr[2]);
        it.decrement();
        assert_eq!(*it.get(), arr[1]);

        let it = s.begin() + 5;
        assert_eq!(*it.get(), arr[5]);
        let it = it - 5;
        assert!(it == s.begin());

        assert_eq!(s.end() - s.begin(), 16);
        assert_eq!(s.begin() - s.end(), -16);
        assert_eq!((s.begin() + 16).position(), 16);
    }

    #[test]
    fn compare() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let left = s.begin();
        let right = s.end();

        assert!(left < right);
        assert!(left <= right);
        assert!(right > left);
        assert!(right >= left);
        assert!(left <= s.begin());
        assert!(left >= s.begin());
    }

    #[test]
    fn begin_end() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let mut it = s.begin();
        let mut j = 0;
        while it != s.end() {
            assert_eq!(*it.get(), arr[j]);
            it.increment();
            j += 1;
        }
        assert_eq!(j, 16);

        assert!(s.iter().eq(arr.iter()));
        assert_eq!(s.iter().len(), 16);
        assert!(s.iter().rev().eq(arr.iter().rev()));
        assert_eq!(s.end().count(), 0);
    }

    #[test]
    fn rbegin_rend() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let rfirst = s.rbegin();
        assert_eq!(*rfirst.get(), arr[15]);
        assert_eq!(rfirst.position(), 0);

        let rlast = s.rend();
        assert_eq!(rlast.position(), 16);
        assert_eq!(rlast.clone() - rfirst.clone(), 16);
        assert!(rfirst < rlast);

        for p in 0..16 {
            let it = s.rbegin() + p as isize;
            assert_eq!(*it.get(), arr[16 - 1 - p]);
        }

        let collected: Vec<f32> = s.rbegin().copied().collect();
        let expected: Vec<f32> = arr.iter().rev().copied().collect();
        assert_eq!(collected, expected);

        assert!(s.rbegin().rev().eq(arr.iter()));
        assert_eq!(s.rend().count(), 0);
        assert!(s.rbegin().base() == s.end());
    }

    #[test]
    fn reverse_calculate() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        let mut it = s.rbegin();
        it.increment();
        assert_eq!(*it.get(), arr[14]);
        assert_eq!(it.position(), 1);
        it += 4;
        assert_eq!(*it.get(), arr[10]);
        it -= 2;
        assert_eq!(*it.get(), arr[12]);
        it.decrement();
        assert_eq!(*it.get(), arr[13]);
        assert_eq!(it.position(), 2);

        let it = s.rend() - 1;
        assert_eq!(*it.get(), arr[0]);
        let it = it - 15;
        assert!(it == s.rbegin());

        let near = s.rbegin() + 1;
        let far = s.rbegin() + 3;
        assert_eq!(far.distance(&near), 2);
        assert_eq!(near.distance(&far), -2);
        assert_eq!(far.clone() - near.clone(), 2);
        assert_eq!(s.rbegin() - s.rend(), -16);
    }

    #[test]
    fn reverse_compare() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);

        assert!(s.rbegin() + 3 > s.rbegin() + 1);
        assert!(s.rbegin() + 1 < s.rbegin() + 3);
        assert!(s.rend() >= s.rbegin());
        assert!(s.rbegin() <= s.rbegin());
        assert!(s.rend() - 16 == s.rbegin());
        assert_eq!(Ord::cmp(&(s.rbegin() + 2), &(s.rbegin() + 5)), Ordering::Less);
        assert_eq!(Ord::max(s.rend(), s.rbegin()).position(), 16);
    }

    #[test]
    fn zero_sized_positions_saturate() {
        let s = unsafe { Span::<()>::from_raw_parts(NonNull::<()>::dangling().as_ptr(), usize::MAX) };

        assert_eq!(s.end() - s.begin(), isize::MAX);
        assert_eq!(s.begin() - s.end(), -isize::MAX);
        assert_eq!(s.rend().distance(&s.rbegin()), isize::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "iterator position 9223372036854775807 is outside")]
    fn zero_sized_deref_end() {
        let s = unsafe { Span::<()>::from_raw_parts(NonNull::<()>::dangling().as_ptr(), usize::MAX) };
        let _ = s.end().get();
    }

    #[test]
    fn empty_iteration() {
        let s = Span::<f32>::new();
        assert_eq!(s.iter().count(), 0);
        assert_eq!(s.rbegin().count(), 0);
        assert!(s.begin() == s.end());
        assert!(s.rbegin() == s.rend());
    }

    #[test]
    fn mixed_consumption() {
        let arr = [0, 1, 2, 3, 4];
        let s = Span::<i32>::from_array(&arr);

        let mut it = s.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 3);
        assert_eq!(it.position(), 1);
        assert_eq!(it.copied().collect::<Vec<_>>(), [1, 2, 3]);

        let mut rit = s.rbegin();
        assert_eq!(rit.next(), Some(&4));
        assert_eq!(rit.next_back(), Some(&0));
        assert_eq!(rit.len(), 3);
    }

    #[test]
    #[should_panic(expected = "iterator position 16 is outside a view of length 16")]
    fn deref_end() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let _ = s.end().get();
    }

    #[test]
    #[should_panic(expected = "iterator position 17")]
    fn advance_past_end() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let _ = s.begin() + 17;
    }

    #[test]
    #[should_panic(expected = "iterator position -1")]
    fn retreat_before_begin() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let mut it = s.begin();
        it.decrement();
    }

    #[test]
    #[should_panic(expected = "iterator position 16")]
    fn deref_rend() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let _ = s.rend().get();
    }

    #[test]
    #[should_panic(expected = "iterator position 17 is outside a view of length 16")]
    fn reverse_before_rbegin() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let _ = s.rbegin() - 1;
    }

    #[test]
    #[should_panic(expected = "outside a view")]
    fn reverse_decrement_at_rbegin() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let mut it = s.rbegin();
        it.decrement();
    }

    #[test]
    #[should_panic(expected = "outside a view")]
    fn reverse_past_rend() {
        let arr = sequence();
        let s = Span::<f32>::from_array(&arr);
        let _ = s.rbegin() + 17;
    }

    #[test]
    #[should_panic(expected = "outside a view")]
    fn deref_empty() {
        let s = Span::<f32>::new();
        let _ = s.begin().get();
    }

    #[test]
    #[cfg(all(debug_assertions, feature = "debug"))]
    #[should_panic(expected = "iterators belong to different views")]
    fn compare_different_origins() {
        let a = sequence();
        let b = sequence();
        let sa = Span::<f32>::from_array(&a);
        let sb = Span::<f32>::from_array(&b);
        let _ = sa.begin() < sb.begin();
    }

    #[test]
    #[cfg(all(debug_assertions, feature = "debug"))]
    #[should_panic(expected = "iterators belong to different views")]
    fn subtract_different_origins() {
        let a = sequence();
        let sa = Span::<f32>::from_array(&a);
        let _ = sa.end() - sa.first(4).end();
    }
}
