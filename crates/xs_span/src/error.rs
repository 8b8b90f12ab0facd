use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// A violated view contract.
///
/// The default API raises these as fatal panics. The `try_*` methods return
/// them instead, so callers off the hot path can branch on the failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpanError {
    #[error("index {index} is out of bounds for a view of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("offset {offset} is out of bounds for a view of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("{count} elements at offset {offset} exceed a view of length {len}")]
    RangeOutOfBounds {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("cannot take {count} elements from a view of length {len}")]
    CountOutOfBounds { count: usize, len: usize },

    #[error("length {actual} does not match the static extent {expect}")]
    ExtentMismatch { expect: usize, actual: usize },

    #[error("null pointer with non-zero length {len}")]
    NullPointer { len: usize },

    #[error("length {len} exceeds the addressable size for the element type")]
    TooLong { len: usize },

    #[error("pointer range end precedes its start")]
    InvertedRange,

    #[error("the view is empty")]
    Empty,

    #[error("iterator position {position} is outside a view of length {len}")]
    IteratorOutOfRange { position: isize, len: usize },

    #[error("iterators belong to different views")]
    OriginMismatch,
}
