//! Comparisons between views.
//!
//! Views compare by content, like slices: the extent parameter never takes
//! part, and views of different lengths are never equal.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::{Span, SpanMut};

// -----------------------------------------------------------------------------
// Equality

macro_rules! impl_span_eq {
    ($lhs:ident, $rhs:ident) => {
        impl<T, U, const E1: usize, const E2: usize> PartialEq<$rhs<'_, U, E2>> for $lhs<'_, T, E1>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs<'_, U, E2>) -> bool {
                self.as_slice() == other.as_slice()
            }
        }
    };
}

impl_span_eq!(Span, Span);
impl_span_eq!(Span, SpanMut);
impl_span_eq!(SpanMut, Span);
impl_span_eq!(SpanMut, SpanMut);

macro_rules! impl_slice_eq {
    ($view:ident) => {
        impl<T, U, const E: usize> PartialEq<[U]> for $view<'_, T, E>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &[U]) -> bool {
                self.as_slice() == other
            }
        }

        impl<T, U, const E: usize, const N: usize> PartialEq<[U; N]> for $view<'_, T, E>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &[U; N]) -> bool {
                self.as_slice() == other.as_slice()
            }
        }

        impl<T: Eq, const E: usize> Eq for $view<'_, T, E> {}

        impl<T: Hash, const E: usize> Hash for $view<'_, T, E> {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_slice().hash(state);
            }
        }
    };
}

impl_slice_eq!(Span);
impl_slice_eq!(SpanMut);

// -----------------------------------------------------------------------------
// Ordering

macro_rules! impl_span_ord {
    ($lhs:ident, $rhs:ident) => {
        impl<T, const E1: usize, const E2: usize> PartialOrd<$rhs<'_, T, E2>> for $lhs<'_, T, E1>
        where
            T: PartialOrd,
        {
            /// Lexicographic comparison of the elements.
            #[inline]
            fn partial_cmp(&self, other: &$rhs<'_, T, E2>) -> Option<Ordering> {
                self.as_slice().partial_cmp(other.as_slice())
            }
        }
    };
}

impl_span_ord!(Span, Span);
impl_span_ord!(Span, SpanMut);
impl_span_ord!(SpanMut, Span);
impl_span_ord!(SpanMut, SpanMut);

impl<T: Ord, const E: usize> Ord for Span<'_, T, E> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Ord, const E: usize> Ord for SpanMut<'_, T, E> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

// -----------------------------------------------------------------------------
// Tests
