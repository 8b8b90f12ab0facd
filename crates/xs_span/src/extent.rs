use core::fmt;

use crate::SpanError;

/// Extent marker for views whose length is only known at run time.
///
/// Also used as the "to the end" count of [`Span::subspan`](crate::Span::subspan).
pub const DYNAMIC_EXTENT: usize = usize::MAX;

// -----------------------------------------------------------------------------
// Extent

/// Value-level reflection of a view's extent parameter.
///
/// # Examples
///
/// ```
/// use xs_span::{Extent, Span, DYNAMIC_EXTENT};
///
/// assert_eq!(Span::<'static, u8, 4>::EXTENT, Extent::Fixed(4));
/// assert_eq!(Span::<'static, u8>::EXTENT, Extent::Dynamic);
/// assert_eq!(Extent::of(DYNAMIC_EXTENT), Extent::Dynamic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// The length is fixed to this count.
    Fixed(usize),
    /// The length is determined at run time.
    Dynamic,
}

impl Extent {
    /// Classifies a raw extent parameter.
    #[inline]
    pub const fn of(extent: usize) -> Self {
        if extent == DYNAMIC_EXTENT {
            Self::Dynamic
        } else {
            Self::Fixed(extent)
        }
    }

    /// Returns `true` for [`Extent::Dynamic`].
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Returns the fixed count, if any.
    #[inline]
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Dynamic => None,
        }
    }

    /// Checks a run-time length against this extent.
    ///
    /// A dynamic extent accepts every length.
    #[inline]
    pub const fn accepts(self, len: usize) -> bool {
        match self {
            Self::Fixed(n) => n == len,
            Self::Dynamic => true,
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => fmt::Display::fmt(n, f),
            Self::Dynamic => f.write_str("dynamic"),
        }
    }
}

// -----------------------------------------------------------------------------
// Validation shared by every view type

/// Largest element count whose byte size still fits in `isize`.
#[inline]
pub(crate) const fn max_len<T>() -> usize {
    match size_of::<T>() {
        0 => usize::MAX,
        n => isize::MAX as usize / n,
    }
}

/// Checks a pointer/length pair against the invariants of a view with extent `E`.
pub(crate) fn check_shape<T, const E: usize>(is_null: bool, len: usize) -> Result<(), SpanError> {
    if is_null && len != 0 {
        return Err(SpanError::NullPointer { len });
    }
    if len > max_len::<T>() {
        return Err(SpanError::TooLong { len });
    }
    check_extent::<E>(len)
}

/// Checks a length against a fixed extent.
#[inline]
pub(crate) const fn check_extent<const E: usize>(len: usize) -> Result<(), SpanError> {
    if Extent::of(E).accepts(len) {
        Ok(())
    } else {
        Err(SpanError::ExtentMismatch {
            expect: E,
            actual: len,
        })
    }
}

/// Checks that a prefix or suffix of `count` elements fits in `len`.
#[inline]
pub(crate) const fn check_count(len: usize, count: usize) -> Result<(), SpanError> {
    if count > len {
        Err(SpanError::CountOutOfBounds { count, len })
    } else {
        Ok(())
    }
}

/// Resolves `offset`/`count` against a view of `len` elements.
///
/// `count == DYNAMIC_EXTENT` selects everything after `offset`.
/// Returns the resolved count.
#[inline]
pub(crate) const fn check_range(len: usize, offset: usize, count: usize) -> Result<usize, SpanError> {
    if offset > len {
        return Err(SpanError::OffsetOutOfBounds { offset, len });
    }
    if count == DYNAMIC_EXTENT {
        return Ok(len - offset);
    }
    if count > len - offset {
        return Err(SpanError::RangeOutOfBounds { offset, count, len });
    }
    Ok(count)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{
        DYNAMIC_EXTENT, Extent, check_count, check_extent, check_range, check_shape, max_len,
    };
    use crate::SpanError;

    #[test]
    fn classify() {
        assert_eq!(Extent::of(0), Extent::Fixed(0));
        assert_eq!(Extent::of(16), Extent::Fixed(16));
        assert!(Extent::of(DYNAMIC_EXTENT).is_dynamic());
        assert_eq!(Extent::Fixed(3).fixed(), Some(3));
        assert_eq!(Extent::Dynamic.fixed(), None);
        assert!(Extent::Dynamic.accepts(12345));
        assert!(!Extent::Fixed(4).accepts(5));
    }

    #[test]
    fn range_resolution() {
        assert_eq!(check_range(16, 2, 4), Ok(4));
        assert_eq!(check_range(16, 2, DYNAMIC_EXTENT), Ok(14));
        assert_eq!(check_range(16, 16, DYNAMIC_EXTENT), Ok(0));
        assert_eq!(check_range(0, 0, 0), Ok(0));
        assert_eq!(
            check_range(16, 17, 0),
            Err(SpanError::OffsetOutOfBounds { offset: 17, len: 16 })
        );
        assert_eq!(
            check_range(16, 10, 7),
            Err(SpanError::RangeOutOfBounds {
                offset: 10,
                count: 7,
                len: 16
            })
        );
        // Huge counts must not wrap around.
        assert!(check_range(16, 1, usize::MAX - 1).is_err());

        assert_eq!(check_count(16, 16), Ok(()));
        assert_eq!(
            check_count(16, DYNAMIC_EXTENT),
            Err(SpanError::CountOutOfBounds {
                count: DYNAMIC_EXTENT,
                len: 16
            })
        );
    }

    #[test]
    fn shape() {
        assert_eq!(check_shape::<u32, DYNAMIC_EXTENT>(true, 0), Ok(()));
        assert_eq!(check_shape::<u32, 0>(true, 0), Ok(()));
        assert_eq!(
            check_shape::<u32, DYNAMIC_EXTENT>(true, 1),
            Err(SpanError::NullPointer { len: 1 })
        );
        assert_eq!(
            check_shape::<u32, DYNAMIC_EXTENT>(false, usize::MAX),
            Err(SpanError::TooLong { len: usize::MAX })
        );
        assert_eq!(
            check_extent::<16>(5),
            Err(SpanError::ExtentMismatch {
                expect: 16,
                actual: 5
            })
        );
        assert_eq!(max_len::<()>(), usize::MAX);
        assert_eq!(max_len::<u8>(), isize::MAX as usize);
    }
}
