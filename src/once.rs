use once_cell::sync::OnceCell;

use crate::cache::{memoized_once, try_memoized_once};

/// Wraps a zero-argument function, computing its result at most once
/// across all threads.
///
/// The single slot starts out empty and is filled by exactly one call;
/// every later call returns a clone of the stored value without
/// locking. Unlike the keyed wrappers, this guarantee holds under
/// concurrent first access: racing callers serialize on the slot and
/// re-check it before computing.
pub struct OnceMemo<F, R> {
    func: F,
    slot: OnceCell<R>,
}

impl<F, R> OnceMemo<F, R>
where
    F: Fn() -> R,
    R: Clone,
{
    /// Wrap a function.
    pub fn new(func: F) -> Self {
        Self { func, slot: OnceCell::new() }
    }

    /// Return the cached result, computing it on the first call.
    pub fn call(&self) -> R {
        memoized_once(&self.slot, &self.func)
    }
}

/// Wraps a fallible zero-argument function.
///
/// A failed computation stores nothing: the error propagates to the
/// caller that triggered it and the next call retries. Once a value is
/// stored, the function never runs again.
pub struct TryOnceMemo<F, T> {
    func: F,
    slot: OnceCell<T>,
}

impl<F, T, E> TryOnceMemo<F, T>
where
    F: Fn() -> Result<T, E>,
    T: Clone,
{
    /// Wrap a fallible function.
    pub fn new(func: F) -> Self {
        Self { func, slot: OnceCell::new() }
    }

    /// Return the cached result, computing it if the slot is still
    /// empty.
    pub fn call(&self) -> Result<T, E> {
        try_memoized_once(&self.slot, &self.func)
    }
}
