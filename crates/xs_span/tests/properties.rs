//! Property-based tests for span subviews.
//!
//! Random arrays and random (offset, count) pairs check that:
//! 1. Subviews address exactly the elements the equivalent slice ranges do.
//! 2. The checked `try_*` forms succeed exactly when the fatal forms do not
//!    panic, and agree on the result.
//! 3. Byte views cover every byte of the source.

use std::panic::{AssertUnwindSafe, catch_unwind};

use proptest::prelude::*;
use xs_span::{DYNAMIC_EXTENT, IterSpan, Span, SpanMut, as_bytes, index_transform};

// -- Strategies --

fn values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(any::<i64>(), 0..64)
}

/// Values together with an offset and count that may or may not fit.
fn values_and_range() -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    values().prop_flat_map(|v| {
        let len = v.len();
        (Just(v), 0..=len + 2, prop_oneof![0..=len + 2, Just(DYNAMIC_EXTENT)])
    })
}

fn fits(len: usize, offset: usize, count: usize) -> bool {
    offset <= len && (count == DYNAMIC_EXTENT || count <= len - offset)
}

// -- Properties --

proptest! {
    #[test]
    fn first_and_last_match_slices(v in values(), count in 0usize..64) {
        let s = Span::<i64>::from_slice(&v);
        let count = count.min(v.len());

        let first = s.first(count);
        prop_assert_eq!(first.as_ptr(), v.as_ptr());
        prop_assert_eq!(first.as_slice(), &v[..count]);

        let last = s.last(count);
        prop_assert_eq!(last.len(), count);
        prop_assert_eq!(last.as_slice(), &v[v.len() - count..]);
        prop_assert_eq!(last.size_bytes(), count * size_of::<i64>());
    }

    #[test]
    fn subspan_matches_slice_ranges((v, offset, count) in values_and_range()) {
        prop_assume!(fits(v.len(), offset, count));
        let s = Span::<i64>::from_slice(&v);

        let sub = s.subspan(offset, count);
        let end = if count == DYNAMIC_EXTENT { v.len() } else { offset + count };
        prop_assert_eq!(sub.as_slice(), &v[offset..end]);
        prop_assert!(sub == v[offset..end]);
        prop_assert_eq!(sub.iter().count(), end - offset);
        prop_assert!(sub.rbegin().eq(v[offset..end].iter().rev()));
    }

    #[test]
    fn checked_agrees_with_fatal((v, offset, count) in values_and_range()) {
        let s = Span::<i64>::from_slice(&v);

        let checked = s.try_subspan(offset, count);
        let fatal = catch_unwind(AssertUnwindSafe(|| s.subspan(offset, count)));

        prop_assert_eq!(checked.is_ok(), fits(v.len(), offset, count));
        match (checked, fatal) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.as_ptr(), b.as_ptr());
                prop_assert_eq!(a.len(), b.len());
            }
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "checked {:?} but fatal ok = {}", a, b.is_ok()),
        }
    }

    #[test]
    fn writable_subviews_write_through((mut v, offset, count) in values_and_range()) {
        prop_assume!(fits(v.len(), offset, count));
        let len = v.len();

        let mut sub = SpanMut::<i64>::from_slice(&mut v).subspan(offset, count);
        let n = sub.len();
        sub.as_mut_slice().fill(-1);

        let end = offset + n;
        prop_assert!(v[offset..end].iter().all(|&x| x == -1));
        prop_assert_eq!(v.len(), len);
    }

    #[test]
    fn bytes_cover_source(v in values()) {
        let s = Span::<i64>::from_slice(&v);
        let bytes = as_bytes(s);

        prop_assert_eq!(bytes.len(), s.size_bytes());
        let expected: Vec<u8> = v.iter().flat_map(|x| x.to_ne_bytes()).collect();
        prop_assert_eq!(bytes.as_slice(), expected.as_slice());
    }

    #[test]
    fn iter_span_matches_function(n in 0usize..256, offset in 0usize..256) {
        let view = IterSpan::new(index_transform(|i| i * 3), n);
        prop_assert!(view.iter().eq((0..n).map(|i| i * 3)));

        let offset = offset.min(n);
        let tail = view.subspan_from(offset);
        prop_assert_eq!(tail.len(), n - offset);
        prop_assert!(tail.iter().rev().eq((offset..n).rev().map(|i| i * 3)));
    }
}
