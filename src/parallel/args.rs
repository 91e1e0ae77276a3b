//! Argument adaptation.
//!
//! Each element handed to the dispatcher is turned into the tuple that is
//! spread into the callable's parameter list. Tuples are passed through as-is,
//! plain values become one-element tuples.

/// A function that can be called with the argument tuple `Args`
pub trait Callable<Args> {
    type Output;

    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($ty:ident),*) => {
        impl<F, R, $($ty,)*> Callable<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case, clippy::unused_unit)]
            fn call(&self, ($($ty,)*): ($($ty,)*)) -> R {
                self($($ty),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A);
impl_callable!(A, B);
impl_callable!(A, B, C);
impl_callable!(A, B, C, D);
impl_callable!(A, B, C, D, E);
impl_callable!(A, B, C, D, E, G);
impl_callable!(A, B, C, D, E, G, H);
impl_callable!(A, B, C, D, E, G, H, I);

/// Conversion of one dispatcher argument into a parameter tuple
pub trait IntoArgs {
    type Args;

    fn into_args(self) -> Self::Args;
}

macro_rules! impl_tuple_args {
    ($($ty:ident),*) => {
        impl<$($ty,)*> IntoArgs for ($($ty,)*) {
            type Args = Self;

            #[inline]
            fn into_args(self) -> Self {
                self
            }
        }
    };
}

impl_tuple_args!();
impl_tuple_args!(A);
impl_tuple_args!(A, B);
impl_tuple_args!(A, B, C);
impl_tuple_args!(A, B, C, D);
impl_tuple_args!(A, B, C, D, E);
impl_tuple_args!(A, B, C, D, E, G);
impl_tuple_args!(A, B, C, D, E, G, H);
impl_tuple_args!(A, B, C, D, E, G, H, I);

macro_rules! impl_scalar_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoArgs for $ty {
                type Args = ($ty,);

                #[inline]
                fn into_args(self) -> ($ty,) {
                    (self,)
                }
            }
        )*
    };
}

impl_scalar_args!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

impl<T> IntoArgs for Vec<T> {
    type Args = (Vec<T>,);

    #[inline]
    fn into_args(self) -> Self::Args {
        (self,)
    }
}

impl<T> IntoArgs for Option<T> {
    type Args = (Option<T>,);

    #[inline]
    fn into_args(self) -> Self::Args {
        (self,)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread<F, T>(func: F, arg: T) -> F::Output
    where
        T: IntoArgs,
        F: Callable<T::Args>,
    {
        func.call(arg.into_args())
    }

    #[test]
    fn test_scalar_is_wrapped() {
        assert_eq!(spread(|x: u32| x * 2, 21u32), 42);
        assert_eq!(spread(|s: String| s.len(), String::from("abc")), 3);
        assert_eq!(spread(|v: Vec<i32>| v.iter().sum::<i32>(), vec![1, 2, 3]), 6);
    }

    #[test]
    fn test_tuple_is_spread() {
        assert_eq!(spread(|a: i32, b: i32| a - b, (5, 3)), 2);
        assert_eq!(spread(|a: u8, b: u8, c: u8| a + b + c, (1u8, 2u8, 3u8)), 6);
        assert_eq!(spread(|| 7, ()), 7);
        assert_eq!(spread(|a: i64| a, (9i64,)), 9);
    }

    #[test]
    fn test_eight_arguments() {
        let f = |a: u8, b: u8, c: u8, d: u8, e: u8, g: u8, h: u8, i: u8| {
            [a, b, c, d, e, g, h, i].iter().map(|&v| v as u32).sum::<u32>()
        };
        assert_eq!(spread(f, (1u8, 2u8, 3u8, 4u8, 5u8, 6u8, 7u8, 8u8)), 36);
    }
}
