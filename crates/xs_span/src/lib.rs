//! This crate provides non-owning, bounds-checked views over contiguous memory.
//!
//! A view is a pointer and a length that borrow existing storage (an array, a
//! buffer, a sub-range of either) without copying it. Every access is checked
//! against the length, and every violation is fatal: the offending call panics
//! immediately instead of reading past the end or handing back garbage.
//!
//! **Span** and **SpanMut**
//!
//! [`Span<'a, T, E>`] is a `Copy` view similar to `&'a [T]`, and [`SpanMut`]
//! is the exclusive, writable counterpart similar to `&'a mut [T]`.
//! The const parameter `E` is the extent: either a fixed element count known
//! at compile time, or [`DYNAMIC_EXTENT`] when the length is only known at run
//! time. Extent mismatches that are visible from the types alone are rejected
//! at compile time.
//!
//! **Iter** and **RevIter**
//!
//! [`Iter`] is a random-access cursor bound to the span it came from, which
//! also works as a normal Rust iterator. [`RevIter`] is its reversing adaptor.
//!
//! **IterSpan**
//!
//! [`IterSpan<P>`] has the same subview interface as [`Span`], but is backed by
//! a [`VirtualPtr`]: anything that can be offset and read, such as an
//! [`IndexTransform`] that computes elements on demand.
//!
//! # Violations
//!
//! Out-of-range indices, out-of-range subviews and malformed construction all
//! panic with a [`SpanError`] message after emitting a `log::error!` record.
//! Build with `panic = "abort"` to turn them into process termination.
//! The `try_*` methods report the same [`SpanError`] as a value instead.
#![expect(unsafe_code, reason = "Views are built on raw pointers.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

#[macro_use]
mod fatal;

mod bytes;
mod cmp;
mod error;
mod extent;
mod iter;
mod iter_span;
mod span;
mod span_mut;

// -----------------------------------------------------------------------------
// Top-level exports

pub use bytes::{as_bytes, as_writable_bytes};
pub use error::SpanError;
pub use extent::{DYNAMIC_EXTENT, Extent};
pub use iter::{Iter, RevIter};
pub use iter_span::{IndexTransform, IterSpan, IterSpanIter, VirtualPtr, index_transform};
pub use span::Span;
pub use span_mut::SpanMut;
