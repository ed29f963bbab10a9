//! Unwrap helpers for tests.
//!
//! They panic with the offending value and point the panic location at the
//! calling test, not at this crate.

use std::fmt::Debug;

/// Unwrap a `Result` that must be `Ok`.
///
/// ```rust
/// use oi_teleop_test_helpers::must;
///
/// let value = must(Ok::<u8, &str>(131));
/// assert_eq!(value, 131);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap a `Result` that must be `Err`, returning the error.
///
/// ```rust
/// use oi_teleop_test_helpers::must_err;
///
/// let err = must_err(Err::<u8, &str>("short read"));
/// assert_eq!(err, "short read");
/// ```
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: unexpected Ok: {v:?}"),
        Err(e) => e,
    }
}

/// Unwrap an `Option` that must be `Some`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result`, prefixing the panic with `context`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_ok() {
        assert_eq!(must(Ok::<i32, &str>(145)), 145);
    }

    #[test]
    #[should_panic(expected = "must: unexpected Err")]
    fn test_must_err_panics() {
        let _ = must(Err::<i32, &str>("connection lost"));
    }

    #[test]
    fn test_must_err_returns_error() {
        assert_eq!(must_err(Err::<i32, &str>("short read")), "short read");
    }

    #[test]
    #[should_panic(expected = "must_err: unexpected Ok")]
    fn test_must_err_on_ok_panics() {
        let _ = must_err(Ok::<i32, &str>(1));
    }

    #[test]
    #[should_panic(expected = "must_some: frame expected")]
    fn test_must_some_none() {
        let _ = must_some(None::<u8>, "frame expected");
    }

    #[test]
    #[should_panic(expected = "must_with: opening port")]
    fn test_must_with_err() {
        let _ = must_with(Err::<i32, &str>("busy"), "opening port");
    }
}
