use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

use crate::extent::{check_extent, check_shape};
use crate::{DYNAMIC_EXTENT, Extent, Iter, Span, SpanError};

// -----------------------------------------------------------------------------
// SpanMut

/// A bounds-checked writable view like `&'a mut [T]`.
///
/// This is the exclusive counterpart of [`Span`]: it has the same
/// constructors, extent rules and subviews, plus write access.
/// It is not `Copy`; use [`reborrow`](Self::reborrow) to derive a
/// shorter-lived view, and [`into_span`](Self::into_span) (or [`From`]) to
/// give up write access.
///
/// # Examples
///
/// ```
/// use xs_span::{Span, SpanMut};
///
/// let mut arr = [0u32; 8];
///
/// let mut s = SpanMut::<u32>::from_array(&mut arr);
/// s[1] = 7;
///
/// let mut tail = s.reborrow().subspan_from(4);
/// tail.as_mut_slice().fill(3);
/// *s.back_mut() = 9;
///
/// let read: Span<'_, u32> = s.into();
/// assert_eq!(read.as_slice(), &[0, 7, 0, 0, 3, 3, 3, 9]);
/// ```
pub struct SpanMut<'a, T, const E: usize = DYNAMIC_EXTENT> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: `SpanMut` behaves like `&mut [T]`.
unsafe impl<T: Send, const E: usize> Send for SpanMut<'_, T, E> {}

// SAFETY: `SpanMut` behaves like `&mut [T]`.
unsafe impl<T: Sync, const E: usize> Sync for SpanMut<'_, T, E> {}

impl<T, const E: usize> Default for SpanMut<'_, T, E> {
    /// An empty view with a null data pointer.
    ///
    /// Only compiles for a zero or dynamic extent.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const E: usize> SpanMut<'a, T, E> {
    /// The extent parameter of this view type.
    pub const EXTENT: Extent = Extent::of(E);

    #[inline(always)]
    pub(crate) const fn assemble(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Takes over the pointer of an already validated shared view.
    ///
    /// Only used on views derived from `self`, so the pointer is writable.
    #[inline(always)]
    fn from_shared<const M: usize>(view: Span<'_, T, M>) -> SpanMut<'a, T, M> {
        SpanMut::assemble(view.as_ptr().cast_mut(), view.len())
    }

    /// A shared view with the full lifetime, for deriving subviews of a
    /// consumed `self`.
    #[inline(always)]
    fn shared(&self) -> Span<'a, T, E> {
        Span::assemble(self.ptr, self.len())
    }

    /// Creates an empty view with a null data pointer.
    ///
    /// Fails to compile unless `E` is `0` or [`DYNAMIC_EXTENT`].
    #[inline]
    pub const fn new() -> Self {
        const {
            assert!(
                E == 0 || E == DYNAMIC_EXTENT,
                "an empty view requires a zero or dynamic extent"
            );
        }
        Self::assemble(ptr::null_mut(), 0)
    }

    /// Creates a view from a data pointer and an element count.
    ///
    /// # Panics
    ///
    /// Same as [`Span::from_raw_parts`].
    ///
    /// # Safety
    ///
    /// When `len` is not zero, `ptr` must be aligned and valid for reads and
    /// writes of `len` consecutive values of `T` for the lifetime `'a`, and
    /// the memory must not be accessed through any other pointer during that
    /// lifetime (see [`slice::from_raw_parts_mut`]). With a `len` of zero any
    /// pointer is accepted and never dereferenced.
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        span_expect!(check_shape::<T, E>(ptr.is_null(), len));
        Self::assemble(ptr, len)
    }

    /// Creates a view over the half-open pointer range `[first, last)`.
    ///
    /// # Panics
    ///
    /// Same as [`Span::from_ptr_range`].
    ///
    /// # Safety
    ///
    /// Both pointers must be derived from the same allocation, and the range
    /// must satisfy the safety contract of [`from_raw_parts`](Self::from_raw_parts).
    #[track_caller]
    pub unsafe fn from_ptr_range(first: *mut T, last: *mut T) -> Self {
        // SAFETY: The caller upholds the contract of `Span::from_ptr_range`.
        let view = unsafe { Span::<T, E>::from_ptr_range(first, last) };
        Self::assemble(first, view.len())
    }

    /// Creates a view over a whole array.
    ///
    /// Fails to compile unless `E` is `N` or [`DYNAMIC_EXTENT`].
    #[inline]
    pub const fn from_array<const N: usize>(array: &'a mut [T; N]) -> Self {
        const {
            assert!(
                E == DYNAMIC_EXTENT || E == N,
                "array length does not match the static extent"
            );
        }
        Self::assemble(array.as_mut_ptr(), N)
    }

    /// Creates a view over a slice.
    ///
    /// # Panics
    ///
    /// `E` is fixed and `slice.len() != E`.
    #[track_caller]
    pub fn from_slice(slice: &'a mut [T]) -> Self {
        span_expect!(Self::try_from_slice(slice))
    }

    /// Creates a view over a slice, reporting an extent mismatch as an error.
    pub fn try_from_slice(slice: &'a mut [T]) -> Result<Self, SpanError> {
        check_extent::<E>(slice.len())?;
        Ok(Self::assemble(slice.as_mut_ptr(), slice.len()))
    }

    /// Creates a view over any contiguous container.
    ///
    /// # Panics
    ///
    /// `E` is fixed and the container length differs from `E`.
    #[track_caller]
    pub fn from_container<C: AsMut<[T]> + ?Sized>(container: &'a mut C) -> Self {
        Self::from_slice(container.as_mut())
    }

    /// Converts to a view with extent `M`.
    ///
    /// Fails to compile unless `M` is [`DYNAMIC_EXTENT`] or equal to `E`.
    #[inline]
    pub fn into_extent<const M: usize>(self) -> SpanMut<'a, T, M> {
        Self::from_shared(self.shared().into_extent::<M>())
    }

    /// Converts to a view with a dynamic extent.
    #[inline]
    pub fn as_dynamic(self) -> SpanMut<'a, T> {
        self.into_extent::<DYNAMIC_EXTENT>()
    }

    /// Borrows a shorter-lived writable view of the same elements.
    #[inline]
    pub fn reborrow(&mut self) -> SpanMut<'_, T, E> {
        SpanMut::assemble(self.ptr, self.len)
    }

    /// Borrows a read-only view of the same elements.
    #[inline]
    pub fn as_span(&self) -> Span<'_, T, E> {
        self.shared()
    }

    /// Gives up write access.
    #[inline]
    pub fn into_span(self) -> Span<'a, T, E> {
        self.shared()
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        if E == DYNAMIC_EXTENT { self.len } else { E }
    }

    /// Returns the size of the viewed elements in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> usize {
        self.len() * size_of::<T>()
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the data pointer, which is null for a default view.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns the mutable data pointer, which is null for a default view.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Returns the viewed elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.shared().as_slice()
    }

    /// Returns the viewed elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len() == 0 {
            &mut []
        } else {
            // SAFETY: `len > 0`, so the constructor contract makes the pointer valid;
            // `&mut self` guarantees exclusivity.
            unsafe { slice::from_raw_parts_mut(self.ptr, self.len()) }
        }
    }

    /// Converts into a mutable slice with the full lifetime.
    #[inline]
    pub fn into_mut_slice(mut self) -> &'a mut [T] {
        let slice = self.as_mut_slice();
        // SAFETY: `self` is consumed, so the slice is the only access path for `'a`.
        unsafe { slice::from_raw_parts_mut(slice.as_mut_ptr(), slice.len()) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// `index >= self.len()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        self.shared().at(index)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// `index >= self.len()`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        span_check!(index < len, SpanError::OutOfBounds { index, len });
        // SAFETY: `index < len`, so the pointer is non-null and the access is in bounds.
        unsafe { &mut *self.ptr.add(index) }
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn front(&self) -> &T {
        self.shared().front()
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn back(&self) -> &T {
        self.shared().back()
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        span_check!(!self.is_empty(), SpanError::Empty);
        self.at_mut(0)
    }

    /// Returns the last element mutably.
    ///
    /// # Panics
    ///
    /// The view is empty.
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        span_check!(!self.is_empty(), SpanError::Empty);
        let last = self.len() - 1;
        self.at_mut(last)
    }

    /// Returns a read-only iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_span().iter()
    }

    /// Returns an iterator that allows modifying each element.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the first `C` elements as a view with static extent `C`.
    ///
    /// Same rules as [`Span::first_const`].
    #[track_caller]
    pub fn first_const<const C: usize>(self) -> SpanMut<'a, T, C> {
        Self::from_shared(self.shared().first_const::<C>())
    }

    /// Returns the last `C` elements as a view with static extent `C`.
    ///
    /// Same rules as [`Span::last_const`].
    #[track_caller]
    pub fn last_const<const C: usize>(self) -> SpanMut<'a, T, C> {
        Self::from_shared(self.shared().last_const::<C>())
    }

    /// Returns the elements in `[O, O + C)` as a view with extent `C`.
    ///
    /// Same rules as [`Span::subspan_const`].
    #[track_caller]
    pub fn subspan_const<const O: usize, const C: usize>(self) -> SpanMut<'a, T, C> {
        Self::from_shared(self.shared().subspan_const::<O, C>())
    }

    /// Returns the first `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn first(self, count: usize) -> SpanMut<'a, T> {
        Self::from_shared(self.shared().first(count))
    }

    /// Returns the last `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn last(self, count: usize) -> SpanMut<'a, T> {
        Self::from_shared(self.shared().last(count))
    }

    /// Returns `count` elements starting at `offset`, or the rest of the view
    /// when `count` is [`DYNAMIC_EXTENT`].
    ///
    /// # Panics
    ///
    /// `offset > self.len()`, or `offset + count > self.len()`.
    #[track_caller]
    pub fn subspan(self, offset: usize, count: usize) -> SpanMut<'a, T> {
        Self::from_shared(self.shared().subspan(offset, count))
    }

    /// Returns every element from `offset` to the end.
    ///
    /// # Panics
    ///
    /// `offset > self.len()`.
    #[track_caller]
    pub fn subspan_from(self, offset: usize) -> SpanMut<'a, T> {
        self.subspan(offset, DYNAMIC_EXTENT)
    }

    /// Checked version of [`first`](Self::first).
    ///
    /// On failure the view is dropped, like any consumed argument.
    pub fn try_first(self, count: usize) -> Result<SpanMut<'a, T>, SpanError> {
        self.shared().try_first(count).map(Self::from_shared)
    }

    /// Checked version of [`last`](Self::last).
    pub fn try_last(self, count: usize) -> Result<SpanMut<'a, T>, SpanError> {
        self.shared().try_last(count).map(Self::from_shared)
    }

    /// Checked version of [`subspan`](Self::subspan).
    pub fn try_subspan(self, offset: usize, count: usize) -> Result<SpanMut<'a, T>, SpanError> {
        self.shared()
            .try_subspan(offset, count)
            .map(Self::from_shared)
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T, const E: usize> Index<usize> for SpanMut<'_, T, E> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, const E: usize> IndexMut<usize> for SpanMut<'_, T, E> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<'a, T, const E: usize> IntoIterator for SpanMut<'a, T, E> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.into_mut_slice().iter_mut()
    }
}

impl<T, const E: usize> AsRef<[T]> for SpanMut<'_, T, E> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const E: usize> AsMut<[T]> for SpanMut<'_, T, E> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        Self::assemble(slice.as_mut_ptr(), slice.len())
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanMut<'a, T, N> {
    #[inline]
    fn from(array: &'a mut [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T, const E: usize> From<SpanMut<'a, T, E>> for Span<'a, T, E> {
    #[inline]
    fn from(span: SpanMut<'a, T, E>) -> Self {
        span.into_span()
    }
}

impl<T: fmt::Debug, const E: usize> fmt::Debug for SpanMut<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
