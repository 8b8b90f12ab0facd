use core::fmt;
use core::iter::FusedIterator;

use crate::extent::{check_count, check_range};
use crate::{DYNAMIC_EXTENT, Iter, SpanError};

// -----------------------------------------------------------------------------
// VirtualPtr

/// A cheaply cloneable cursor that can be offset and read, without
/// necessarily addressing real memory.
///
/// This is the capability [`IterSpan`] is built on. An implementation may
/// compute its elements on demand, see [`IndexTransform`].
pub trait VirtualPtr: Clone {
    /// The element type produced by [`read`](Self::read).
    type Item;

    /// Returns a cursor `count` elements further along.
    fn offset(&self, count: usize) -> Self;

    /// Produces the element under the cursor.
    fn read(&self) -> Self::Item;
}

impl<T: Clone> VirtualPtr for Iter<'_, T> {
    type Item = T;

    /// # Panics
    ///
    /// The new position would lie past the end of the originating span.
    #[track_caller]
    fn offset(&self, count: usize) -> Self {
        let delta = isize::try_from(count).unwrap_or(isize::MAX);
        self.clone() + delta
    }

    #[track_caller]
    fn read(&self) -> T {
        self.get().clone()
    }
}

// -----------------------------------------------------------------------------
// IndexTransform

/// A virtual pointer whose element `i` is `f(i)`.
///
/// Nothing is stored; each [`read`](VirtualPtr::read) calls the function
/// with the current index.
///
/// # Examples
///
/// ```
/// use xs_span::{VirtualPtr, index_transform};
///
/// let squares = index_transform(|i| i * i);
/// assert_eq!(squares.offset(7).read(), 49);
/// ```
#[derive(Clone, Copy)]
pub struct IndexTransform<F> {
    index: usize,
    f: F,
}

/// Creates an [`IndexTransform`] starting at index `0`.
#[inline]
pub const fn index_transform<F, R>(f: F) -> IndexTransform<F>
where
    F: Fn(usize) -> R + Clone,
{
    IndexTransform { index: 0, f }
}

impl<F> IndexTransform<F> {
    /// Returns the index the next read will pass to the function.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<F, R> VirtualPtr for IndexTransform<F>
where
    F: Fn(usize) -> R + Clone,
{
    type Item = R;

    #[inline]
    fn offset(&self, count: usize) -> Self {
        Self {
            index: self.index + count,
            f: self.f.clone(),
        }
    }

    #[inline]
    fn read(&self) -> R {
        (self.f)(self.index)
    }
}

impl<F> fmt::Debug for IndexTransform<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexTransform")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// IterSpan

/// A view over `len` elements reachable from a [`VirtualPtr`].
///
/// It has the same subview interface as [`Span`](crate::Span), but elements
/// are produced by offsetting and reading the virtual pointer, so they are
/// returned by value. The extent is always dynamic.
///
/// Indexing is bounds-checked exactly like `Span`: reading outside
/// `[0, len)` is a fatal violation.
///
/// # Examples
///
/// ```
/// use xs_span::{IterSpan, index_transform};
///
/// let s = IterSpan::new(index_transform(|i| i * 10), 5);
/// assert_eq!(s.at(3), 30);
///
/// let tail = s.subspan_from(1);
/// assert_eq!(tail.len(), 4);
/// assert_eq!(tail.at(0), 10);
///
/// assert_eq!(s.iter().collect::<Vec<_>>(), [0, 10, 20, 30, 40]);
/// ```
#[derive(Clone, Copy)]
pub struct IterSpan<P> {
    ptr: P,
    len: usize,
}

impl<P: VirtualPtr> IterSpan<P> {
    /// Creates a view over the `len` elements starting at `ptr`.
    #[inline]
    pub const fn new(ptr: P, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the virtual pointer to the first element.
    #[inline]
    pub const fn virtual_ptr(&self) -> &P {
        &self.ptr
    }

    /// Produces the element at `index`.
    ///
    /// # Panics
    ///
    /// `index >= self.len()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> P::Item {
        let len = self.len;
        span_check!(index < len, SpanError::OutOfBounds { index, len });
        self.ptr.offset(index).read()
    }

    /// Produces the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<P::Item> {
        (index < self.len).then(|| self.ptr.offset(index).read())
    }

    /// Returns the first `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn first(&self, count: usize) -> Self {
        span_expect!(check_count(self.len, count));
        Self::new(self.ptr.clone(), count)
    }

    /// Returns the last `count` elements.
    ///
    /// # Panics
    ///
    /// `count > self.len()`.
    #[track_caller]
    pub fn last(&self, count: usize) -> Self {
        span_expect!(check_count(self.len, count));
        Self::new(self.ptr.offset(self.len - count), count)
    }

    /// Returns `count` elements starting at `offset`.
    ///
    /// A `count` of [`DYNAMIC_EXTENT`] selects everything after `offset`.
    ///
    /// # Panics
    ///
    /// `offset > self.len()`, or `offset + count > self.len()`.
    #[track_caller]
    pub fn subspan(&self, offset: usize, count: usize) -> Self {
        span_expect!(self.try_subspan(offset, count))
    }

    /// Returns every element from `offset` to the end.
    ///
    /// # Panics
    ///
    /// `offset > self.len()`.
    #[track_caller]
    pub fn subspan_from(&self, offset: usize) -> Self {
        self.subspan(offset, DYNAMIC_EXTENT)
    }

    /// Checked version of [`subspan`](Self::subspan).
    pub fn try_subspan(&self, offset: usize, count: usize) -> Result<Self, SpanError> {
        let count = check_range(self.len, offset, count)?;
        Ok(Self::new(self.ptr.offset(offset), count))
    }

    /// Returns an iterator producing every element in order.
    #[inline]
    pub fn iter(&self) -> IterSpanIter<P> {
        IterSpanIter {
            ptr: self.ptr.clone(),
            front: 0,
            back: self.len,
        }
    }
}

impl<P: VirtualPtr> IntoIterator for IterSpan<P> {
    type Item = P::Item;
    type IntoIter = IterSpanIter<P>;

    #[inline]
    fn into_iter(self) -> IterSpanIter<P> {
        IterSpanIter {
            ptr: self.ptr,
            front: 0,
            back: self.len,
        }
    }
}

impl<P: VirtualPtr> IntoIterator for &IterSpan<P> {
    type Item = P::Item;
    type IntoIter = IterSpanIter<P>;

    #[inline]
    fn into_iter(self) -> IterSpanIter<P> {
        self.iter()
    }
}

impl<P: fmt::Debug> fmt::Debug for IterSpan<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterSpan")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// IterSpanIter

/// Iterator over the elements of an [`IterSpan`].
#[derive(Clone, Debug)]
pub struct IterSpanIter<P> {
    ptr: P,
    front: usize,
    back: usize,
}

impl<P: VirtualPtr> Iterator for IterSpanIter<P> {
    type Item = P::Item;

    #[inline]
    fn next(&mut self) -> Option<P::Item> {
        if self.front < self.back {
            let item = self.ptr.offset(self.front).read();
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<P: VirtualPtr> DoubleEndedIterator for IterSpanIter<P> {
    #[inline]
    fn next_back(&mut self) -> Option<P::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.ptr.offset(self.back).read())
        } else {
            None
        }
    }
}

impl<P: VirtualPtr> ExactSizeIterator for IterSpanIter<P> {}

impl<P: VirtualPtr> FusedIterator for IterSpanIter<P> {}

// -----------------------------------------------------------------------------
// Tests
