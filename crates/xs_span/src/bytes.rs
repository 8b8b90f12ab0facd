use bytemuck::{NoUninit, Pod};

use crate::{Span, SpanMut};

/// Reinterprets a view as its underlying bytes.
///
/// The result has `span.size_bytes()` elements and starts at the same
/// address. A null view yields a null byte view.
///
/// # Examples
///
/// ```
/// use xs_span::{Span, as_bytes};
///
/// let arr = [1u32, 2, 3];
/// let s = Span::<u32>::from_array(&arr);
///
/// let bytes = as_bytes(s);
/// assert_eq!(bytes.len(), s.len() * size_of::<u32>());
/// assert_eq!(bytes.first(4).as_slice(), &1u32.to_ne_bytes());
/// ```
#[inline]
pub fn as_bytes<'a, T: NoUninit, const E: usize>(span: Span<'a, T, E>) -> Span<'a, u8> {
    if span.size_bytes() == 0 {
        return Span::assemble(span.as_ptr().cast(), 0);
    }
    Span::from(bytemuck::cast_slice::<T, u8>(span.as_slice()))
}

/// Reinterprets a writable view as its underlying bytes.
///
/// Every bit pattern written through the result must be a valid `T`,
/// which the [`Pod`] bound guarantees. Read-only views are rejected at
/// compile time:
///
/// ```compile_fail
/// use xs_span::{Span, as_writable_bytes};
///
/// let arr = [1u32, 2, 3];
/// let s = Span::<u32>::from_array(&arr);
/// let bytes = as_writable_bytes(s);
/// ```
///
/// # Examples
///
/// ```
/// use xs_span::{SpanMut, as_writable_bytes};
///
/// let mut arr = [0u16; 4];
///
/// let mut bytes = as_writable_bytes(SpanMut::<u16>::from_array(&mut arr));
/// assert_eq!(bytes.len(), 8);
/// bytes.as_mut_slice().fill(0xff);
///
/// assert_eq!(arr, [u16::MAX; 4]);
/// ```
#[inline]
pub fn as_writable_bytes<'a, T: Pod, const E: usize>(span: SpanMut<'a, T, E>) -> SpanMut<'a, u8> {
    if span.size_bytes() == 0 {
        return SpanMut::assemble(span.as_ptr().cast_mut().cast(), 0);
    }
    SpanMut::from(bytemuck::cast_slice_mut::<T, u8>(span.into_mut_slice()))
}

// -----------------------------------------------------------------------------
// Tests
