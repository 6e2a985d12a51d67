use std::hash::Hash;

use crate::cache::{Cache, memoized, try_memoized};

/// A callable viewed as a function of its ordered argument tuple.
///
/// Implemented for functions and closures of one to nine arguments.
/// Zero-argument callables are deliberately excluded: they are wrapped
/// by [`OnceMemo`](crate::OnceMemo), which makes a stronger
/// compute-once guarantee than the keyed cache does.
pub trait Callable<K> {
    /// The callable's return type.
    type Output;

    /// Invoke with the given argument tuple.
    fn invoke(&self, args: K) -> Self::Output;
}

/// Wraps a function of one to nine arguments, caching its results
/// keyed by the ordered argument tuple.
///
/// Two calls share a cache entry exactly when their argument tuples
/// compare equal element-wise; `(a, b)` and `(b, a)` are distinct keys
/// unless `a == b`. The miss path is not serialized per key: concurrent
/// first calls with the same fresh tuple may each run the function once
/// (see the crate-level docs).
pub struct Memo<F, K, R> {
    func: F,
    cache: Cache<K, R>,
}

impl<F, K, R> Memo<F, K, R>
where
    F: Callable<K, Output = R>,
{
    /// Wrap a function.
    pub fn new(func: F) -> Self {
        Self { func, cache: Cache::new() }
    }
}

/// Wraps a fallible function of one to nine arguments.
///
/// Only `Ok` results are cached. An `Err` propagates to the caller,
/// leaves no entry behind, and the next call with the same argument
/// tuple retries the computation.
pub struct TryMemo<F, K, T> {
    func: F,
    cache: Cache<K, T>,
}

impl<F, K, T, E> TryMemo<F, K, T>
where
    F: Callable<K, Output = Result<T, E>>,
{
    /// Wrap a fallible function.
    pub fn new(func: F) -> Self {
        Self { func, cache: Cache::new() }
    }
}

macro_rules! tuples {
    ($($param:ident $arg:ident),*) => {
        impl<Func, $($param,)* R> Callable<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> R,
        {
            type Output = R;

            #[inline]
            fn invoke(&self, ($($arg,)*): ($($param,)*)) -> R {
                self($($arg),*)
            }
        }

        impl<Func, $($param,)* R> Memo<Func, ($($param,)*), R>
        where
            Func: Callable<($($param,)*), Output = R>,
            $($param: Eq + Hash + Clone,)*
            R: Clone,
        {
            /// Invoke the wrapped function, reusing the cached result
            /// for a previously seen argument tuple.
            pub fn call(&self, $($arg: $param),*) -> R {
                let key = ($($arg.clone(),)*);
                memoized(&self.cache, key, || self.func.invoke(($($arg,)*)))
            }
        }

        impl<Func, $($param,)* T, E> TryMemo<Func, ($($param,)*), T>
        where
            Func: Callable<($($param,)*), Output = Result<T, E>>,
            $($param: Eq + Hash + Clone,)*
            T: Clone,
        {
            /// Invoke the wrapped function, reusing the cached `Ok`
            /// result for a previously seen argument tuple.
            pub fn call(&self, $($arg: $param),*) -> Result<T, E> {
                let key = ($($arg.clone(),)*);
                try_memoized(&self.cache, key, || self.func.invoke(($($arg,)*)))
            }
        }
    };
}

tuples! { A1 a1 }
tuples! { A1 a1, A2 a2 }
tuples! { A1 a1, A2 a2, A3 a3 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4, A5 a5 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8 }
tuples! { A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9 }
