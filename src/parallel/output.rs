//! Task outputs.
//!
//! A task may report failure by returning an error instead of panicking.
//! Backends that collect results hand that error back to the caller; the
//! timeout pool, which discards results, uses [`TaskOutput::failure`] to log
//! and count it.

use std::fmt::Display;

/// A value returned by a dispatched task
pub trait TaskOutput {
    /// Description of the failure, if the value represents one
    fn failure(&self) -> Option<String>;
}

impl<T, E: Display> TaskOutput for Result<T, E> {
    fn failure(&self) -> Option<String> {
        self.as_ref().err().map(|e| e.to_string())
    }
}

macro_rules! impl_plain_output {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TaskOutput for $ty {
                #[inline]
                fn failure(&self) -> Option<String> {
                    None
                }
            }
        )*
    };
}

impl_plain_output!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, std::time::Duration,
);

impl<T> TaskOutput for Vec<T> {
    fn failure(&self) -> Option<String> {
        None
    }
}

impl<T> TaskOutput for Option<T> {
    fn failure(&self) -> Option<String> {
        None
    }
}

macro_rules! impl_tuple_output {
    ($($ty:ident),+) => {
        impl<$($ty,)+> TaskOutput for ($($ty,)+) {
            #[inline]
            fn failure(&self) -> Option<String> {
                None
            }
        }
    };
}

impl_tuple_output!(A);
impl_tuple_output!(A, B);
impl_tuple_output!(A, B, C);
impl_tuple_output!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_failures() {
        let ok: Result<u32, String> = Ok(3);
        let err: Result<u32, String> = Err("no such function".to_string());
        assert_eq!(ok.failure(), None);
        assert_eq!(err.failure().as_deref(), Some("no such function"));
    }

    #[test]
    fn test_plain_values_never_fail() {
        assert_eq!(7u64.failure(), None);
        assert_eq!(().failure(), None);
        assert_eq!(None::<u8>.failure(), None);
        assert_eq!((1, "a").failure(), None);
    }
}
