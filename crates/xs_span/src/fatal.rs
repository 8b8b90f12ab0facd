use crate::SpanError;

/// Reports a violated view contract and never returns.
///
/// Emits one `log::error!` record, then panics with the error message.
/// With `panic = "abort"` this terminates the process.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn raise(err: SpanError) -> ! {
    log::error!("span contract violated: {err}");
    panic!("span contract violated: {err}")
}

/// Raises `$err` unless `$cond` holds.
///
/// The error expression is only evaluated on the failing branch.
macro_rules! span_check {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            $crate::fatal::raise($err)
        }
    };
}

/// Unwraps a checked result, raising the error on failure.
macro_rules! span_expect {
    ($res:expr $(,)?) => {
        match $res {
            Ok(value) => value,
            Err(err) => $crate::fatal::raise(err),
        }
    };
}
