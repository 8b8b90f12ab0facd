use core::fmt;
use core::marker::PhantomData;
use core::ops::Index;
use core::ptr;
use core::slice;

use crate::extent::{check_count, check_extent, check_range, check_shape};
use crate::{DYNAMIC_EXTENT, Extent, Iter, RevIter, SpanError};

// -----------------------------------------------------------------------------
// Span

/// A bounds-checked view like `&'a [T]`, with an optional static extent.
///
/// `E` is either a fixed element count or [`DYNAMIC_EXTENT`] (the default).
/// When `E` is fixed, the length of the view always equals `E`.
///
/// Unlike a slice, the data pointer may be null, which is what
/// [`new`](Self::new) and [`Default`] produce. A non-null pointer with a
/// length of zero is also a valid view; it just has nothing to index.
///
/// Every contract violation panics immediately, see [`SpanError`].
///
/// # Examples
///
/// ```
/// use xs_span::Span;
///
/// let arr = [0, 1, 2, 3, 4, 5];
///
/// let s: Span<'_, i32> = Span::from_array(&arr);
/// assert_eq!(s.len(), 6);
/// assert_eq!(s[2], 2);
///
/// let fixed: Span<'_, i32, 2> = s.first_const::<2>();
/// assert_eq!(fixed.as_slice(), &[0, 1]);
///
/// let tail = s.subspan_from(4);
/// assert_eq!(tail.as_slice(), &[4, 5]);
/// ```
pub struct Span<'a, T, const E: usize = DYNAMIC_EXTENT> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<T, const E: usize> Clone for Span<'_, T, E> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const E: usize> Copy for Span<'_, T, E> {}

// SAFETY: `Span` behaves like `&[T]`.
unsafe impl<T: Sync, const E: usize> Send for Span<'_, T, E> {}

// SAFETY: `Span` behaves like `&[T]`.
unsafe impl<T: Sync, const E: usize> Sync for Span<'_, T, E> {}

impl<T, const E: usize> Default for Span<'_, T, E> {
    /// An empty view with a null data pointer.
    ///
    /// Only compiles for a zero or dynamic extent.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const E: usize> Span<'a, T, E> {
    /// The extent parameter of this view type.
    pub const EXTENT: Extent = Extent::of(E);

    #[inline(always)]
    pub(crate) const fn assemble(ptr: *const T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates an empty view with a null data pointer.
    ///
    /// A view with a nonzero static extent cannot be empty,
    /// so this fails to compile unless `E` is `0` or [`DYNAMIC_EXTENT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::Span;
    ///
    /// let s = Span::<f32>::new();
    /// assert_eq!(s.len(), 0);
    /// assert!(s.as_ptr().is_null());
    ///
    /// let s = Span::<f32, 0>::new();
    /// assert!(s.is_empty());
    /// ```
    ///
    /// ```compile_fail
    /// use xs_span::Span;
    ///
    /// let s = Span::<f32, 4>::new();
    /// ```
    #[inline]
    pub const fn new() -> Self {
        const {
            assert!(
                E == 0 || E == DYNAMIC_EXTENT,
                "an empty view requires a zero or dynamic extent"
            );
        }
        Self::assemble(ptr::null(), 0)
    }

    /// Creates a view from a data pointer and an element count.
    ///
    /// # Panics
    ///
    /// - `ptr` is null while `len` is not zero.
    /// - `len * size_of::<T>()` exceeds `isize::MAX`.
    /// - `E` is fixed and `len != E`.
    ///
    /// # Safety
    ///
    /// When `len` is not zero, `ptr` must be aligned and valid for reads of
    /// `len` consecutive values of `T` for the lifetime `'a`, and the memory
    /// must not be mutated through another pointer during that lifetime
    /// (see [`slice::from_raw_parts`]). With a `len` of zero any pointer is
    /// accepted and never dereferenced.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::Span;
    ///
    /// let arr = [1.0f32; 16];
    ///
    /// let s = unsafe { Span::<f32, 16>::from_raw_parts(arr.as_ptr(), 16) };
    /// assert_eq!(s.as_ptr(), arr.as_ptr());
    /// ```
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        span_expect!(check_shape::<T, E>(ptr.is_null(), len));
        Self::assemble(ptr, len)
    }

    /// Creates a view over the half-open pointer range `[first, last)`.
    ///
    /// Zero-sized element types have no measurable ranges and fail to compile.
    ///
    /// # Panics
    ///
    /// - `last` precedes `first`.
    /// - The resulting length violates any rule of [`from_raw_parts`](Self::from_raw_parts).
    ///
    /// # Safety
    ///
    /// Both pointers must be derived from the same allocation, and the range
    /// must satisfy the safety contract of [`from_raw_parts`](Self::from_raw_parts).
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::Span;
    ///
    /// let arr = [0u32, 1, 2, 3];
    /// let range = arr.as_ptr_range();
    ///
    /// let s = unsafe { Span::<u32>::from_ptr_range(range.start, range.end) };
    /// assert_eq!(s.len(), 4);
    /// ```
    #[track_caller]
    pub unsafe fn from_ptr_range(first: *const T, last: *const T) -> Self {
        const {
            assert!(
                size_of::<T>() != 0,
                "pointer ranges of zero-sized elements have no length"
            );
        }
        span_check!(first.addr() <= last.addr(), SpanError::InvertedRange);
        let len = (last.addr() - first.addr()) / size_of::<T>();
        // SAFETY: The caller upholds the contract of `from_raw_parts`.
        unsafe { Self::from_raw_parts(first, len) }
    }

    /// Creates a view over a whole array.
    ///
    /// Fails to compile unless `E` is `N` or [`DYNAMIC_EXTENT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::Span;
    ///
    /// let arr = [0u8; 16];
    ///
    /// let s: Span<'_, u8, 16> = Span::from_array(&arr);
    /// let d: Span<'_, u8> = Span::from_array(&arr);
    /// assert_eq!(s.len(), d.len());
    /// ```
    ///
    /// ```compile_fail
    /// use xs_span::Span;
    ///
    /// let arr = [0u8; 16];
    /// let s: Span<'_, u8, 4> = Span::from_array(&arr);
    /// ```
    #[inline]
    pub const fn from_array<const N: usize>(array: &'a [T; N]) -> Self {
        const {
            assert!(
                E == DYNAMIC_EXTENT || E == N,
                "array length does not match the static extent"
            );
        }
        Self::assemble(array.as_ptr(), N)
    }

    /// Creates a view over a slice.
    ///
    /// # Panics
    ///
    /// `E` is fixed and `slice.len() != E`.
    #[track_caller]
    pub fn from_slice(slice: &'a [T]) -> Self {
        span_expect!(Self::try_from_slice(slice))
    }

    /// Creates a view over a slice, reporting an extent mismatch as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::{Span, SpanError};
    ///
    /// let v = vec![1, 2, 3];
    /// assert!(Span::<i32, 3>::try_from_slice(&v).is_ok());
    /// assert_eq!(
    ///     Span::<i32, 4>::try_from_slice(&v),
    ///     Err(SpanError::ExtentMismatch { expect: 4, actual: 3 }),
    /// );
    /// ```
    pub fn try_from_slice(slice: &'a [T]) -> Result<Self, SpanError> {
        check_extent::<E>(slice.len())?;
        Ok(Self::assemble(slice.as_ptr(), slice.len()))
    }

    /// Creates a view over any contiguous container.
    ///
    /// # Panics
    ///
    /// `E` is fixed and the container length differs from `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::Span;
    ///
    /// let v = vec![0.5f64; 8];
    /// let s = Span::<f64>::from_container(&v);
    /// assert_eq!(s.as_ptr(), v.as_ptr());
    /// ```
    #[track_caller]
    pub fn from_container<C: AsRef<[T]> + ?Sized>(container: &'a C) -> Self {
        Self::from_slice(container.as_ref())
    }

    /// Converts to a view with extent `M`.
    ///
    /// Fails to compile unless `M` is [`DYNAMIC_EXTENT`] or equal to `E`.
    ///
    /// ```compile_fail
    /// use xs_span::Span;
    ///
    /// let arr = [0u8; 4];
    /// let s = Span::<u8>::from_array(&arr);
    /// let fixed = s.into_extent::<4>();
    /// ```
    #[inline]
    pub const fn into_extent<const M: usize>(self) -> Span<'a, T, M> {
        const {
            assert!(
                M == DYNAMIC_EXTENT || M == E,
                "a view can only convert to a dynamic or identical extent"
            );
        }
        Span::assemble(self.ptr, self.len())
    }

    /// Converts to a view with a dynamic extent.
    #[inline]
    pub const fn as_dynamic(self) -> Span<'a, T> {
        self.into_extent::<DYNAMIC_EXTENT>()
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(self) -> usize {
        if E == DYNAMIC_EXTENT { self.len } else { E }
    }

    /// Returns the size of the viewed elements in bytes.
    #[inline]
    pub const fn size_bytes(self) -> usize {
        self.len() * size_of::<T>()
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns the data pointer, which is null for a default view.
    #[inline]
    pub const fn as_ptr(self) -> *const T {
        self.ptr
    }

    /// Returns the viewed elements as a slice.
    ///
    /// An empty view yields `&[]`, whatever its data pointer.
    #[inline]
    pub const fn as_slice(self) -> &'a [T] {
        if self.len() == 0 {
            &[]
        } else {
            // SAFETY: `len > 0`, so the constructor contract makes the pointer valid for `len` reads.
            unsafe { slice::from_raw_parts(self.ptr, self.len()) }
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// This is the call-style equivalent of `span[index]`.
    ///
    /// # Panics
    ///
    /// `index >= self.len()`.
    #[track_caller]
    pub fn at(self, index: usize) -> &'a T {
        let len = self.len();
        span_check!(index < len, SpanError::OutOfBounds { index, len });
        // SAFETY: `index < len`, so the pointer is non-null and the read is in bounds.
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn front(self) -> &'a T {
        span_check!(!self.is_empty(), SpanError::Empty);
        self.at(0)
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn back(self) -> &'a T {
        span_check!(!self.is_empty(), SpanError::Empty);
        self.at(self.len() - 1)
    }

    /// Returns an iterator positioned at the first element.
    #[inline]
    pub fn iter(self) -> Iter<'a, T> {
        Iter::new(self.ptr, self.len(), 0)
    }

    /// Same as [`iter`](Self::iter).
    #[inline]
    pub fn begin(self) -> Iter<'a, T> {
        self.iter()
    }

    /// Returns an iterator positioned one past the last element.
    #[inline]
    pub fn end(self) -> Iter<'a, T> {
        Iter::new(self.ptr, self.len(), self.len())
    }

    /// Returns a reverse iterator positioned at the last element.
    #[inline]
    pub fn rbegin(self) -> RevIter<'a, T> {
        RevIter::new(self.end())
    }

    /// Returns a reverse iterator positioned one before the first element.
    #[inline]
    pub fn rend(self) -> RevIter<'a, T> {
        RevIter::new(self.begin())
    }

    /// Offsets the data pointer by `offset <= len` elements.
    #[inline(always)]
    fn offset_ptr(self, offset: usize) -> *const T {
        if offset == 0 {
            self.ptr
        } else {
            // SAFETY: `0 < offset <= len`, so the pointer is non-null and the
            // result is in bounds or one past the end.
            unsafe { self.ptr.add(offset) }
        }
    }

    /// Returns the first `C` elements as a view with static extent `C`.
    ///
    /// Fails to compile if `E` is fixed and `C > E`.
    ///
    /// # Panics
    ///
    /// `C > self.len()`.
    #[track_caller]
    pub fn first_const<const C: usize>(self) -> Span<'a, T, C> {
        const {
            assert!(
                E == DYNAMIC_EXTENT || C <= E,
                "prefix is longer than the static extent"
            );
        }
        span_expect!(check_count(self.len(), C));
        Span::assemble(self.ptr, C)
    }

    /// Returns the last `C` elements as a view with static extent `C`.
    ///
    /// Fails to compile if `E` is fixed and `C > E`.
    ///
    /// # Panics
    ///
    /// `C > self.len()`.
    #[track_caller]
    pub fn last_const<const C: usize>(self) -> Span<'a, T, C> {
        const {
            assert!(
                E == DYNAMIC_EXTENT || C <= E,
                "suffix is longer than the static extent"
            );
        }
        span_expect!(check_count(self.len(), C));
        Span::assemble(self.offset_ptr(self.len() - C), C)
    }

    /// Returns the elements in `[O, O + C)`, or `[O, len)` when `C` is
    /// [`DYNAMIC_EXTENT`], as a view with extent `C`.
    ///
    /// Fails to compile if `E` is fixed and the range does not fit in it.
    ///
    /// # Panics
    ///
    /// The range does not fit in `self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::{Span, DYNAMIC_EXTENT};
    ///
    /// let arr = [0, 1, 2, 3, 4, 5, 6, 7];
    /// let s = Span::<i32, 8>::from_array(&arr);
    ///
    /// let mid: Span<'_, i32, 3> = s.subspan_const::<2, 3>();
    /// assert_eq!(mid.as_slice(), &[2, 3, 4]);
    ///
    /// let rest = s.subspan_const::<4, DYNAMIC_EXTENT>();
    /// assert_eq!(rest.len(), 4);
    /// ```
    #[track_caller]
    pub fn subspan_const<const O: usize, const C: usize>(self) -> Span<'a, T, C> {
        const {
            assert!(
                E == DYNAMIC_EXTENT || (O <= E && (C == DYNAMIC_EXTENT || C <= E - O)),
                "subspan does not fit in the static extent"
            );
        }
        let count = span_expect!(check_range(self.len(), O, C));
        Span::assemble(self.offset_ptr(O), count)
    }

    /// Returns the first `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn first(self, count: usize) -> Span<'a, T> {
        span_expect!(self.try_first(count))
    }

    /// Returns the last `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn last(self, count: usize) -> Span<'a, T> {
        span_expect!(self.try_last(count))
    }

    /// Returns `count` elements starting at `offset`.
    ///
    /// A `count` of [`DYNAMIC_EXTENT`] selects everything after `offset`.
    ///
    /// # Panics
    ///
    /// `offset > self.len()`, or `offset + count > self.len()`.
    #[track_caller]
    pub fn subspan(self, offset: usize, count: usize) -> Span<'a, T> {
        span_expect!(self.try_subspan(offset, count))
    }

    /// Returns every element from `offset` to the end.
    ///
    /// # Panics
    ///
    /// `offset > self.len()`.
    #[track_caller]
    pub fn subspan_from(self, offset: usize) -> Span<'a, T> {
        self.subspan(offset, DYNAMIC_EXTENT)
    }

    /// Checked version of [`first`](Self::first).
    pub fn try_first(self, count: usize) -> Result<Span<'a, T>, SpanError> {
        check_count(self.len(), count)?;
        Ok(Span::assemble(self.ptr, count))
    }

    /// Checked version of [`last`](Self::last).
    pub fn try_last(self, count: usize) -> Result<Span<'a, T>, SpanError> {
        check_count(self.len(), count)?;
        Ok(Span::assemble(self.offset_ptr(self.len() - count), count))
    }

    /// Checked version of [`subspan`](Self::subspan).
    ///
    /// # Examples
    ///
    /// ```
    /// use xs_span::{Span, SpanError};
    ///
    /// let arr = [0u8; 16];
    /// let s = Span::<u8>::from_array(&arr);
    ///
    /// assert_eq!(s.try_subspan(2, 4).map(|v| v.len()), Ok(4));
    /// assert_eq!(
    ///     s.try_subspan(17, 0),
    ///     Err(SpanError::OffsetOutOfBounds { offset: 17, len: 16 }),
    /// );
    /// ```
    pub fn try_subspan(self, offset: usize, count: usize) -> Result<Span<'a, T>, SpanError> {
        let count = check_range(self.len(), offset, count)?;
        Ok(Span::assemble(self.offset_ptr(offset), count))
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T, const E: usize> Index<usize> for Span<'_, T, E> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<'a, T, const E: usize> IntoIterator for Span<'a, T, E> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, const E: usize> IntoIterator for &Span<'a, T, E> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, const E: usize> AsRef<[T]> for Span<'_, T, E> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        Self::assemble(slice.as_ptr(), slice.len())
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T, N> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T, const E: usize> From<Span<'a, T, E>> for &'a [T] {
    #[inline]
    fn from(span: Span<'a, T, E>) -> Self {
        span.as_slice()
    }
}

impl<T: fmt::Debug, const E: usize> fmt::Debug for Span<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
