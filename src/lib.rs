//! Concurrency-safe function memoization.
//!
//! Wrapping a pure function makes repeated calls with equal arguments
//! reuse the first computed result instead of re-executing.
//!
//! ```
//! use memofn::Memo;
//!
//! let double = Memo::new(|x: u32| 2 * x);
//! assert_eq!(double.call(7), 14);
//! assert_eq!(double.call(7), 14); // Cached.
//! ```
//!
//! Results are keyed by the ordered tuple of arguments: keys compare
//! equal exactly when every positional argument compares equal, so
//! `call(0, 1)` and `call(1, 0)` are distinct entries. Argument types
//! must implement `Eq`, `Hash` and `Clone`; results must implement
//! `Clone`. For functions, the [`memoize`] attribute wraps all of this
//! up:
//!
//! ```
//! #[memofn::memoize]
//! fn fib(n: u64) -> u64 {
//!     if n <= 2 { 1 } else { fib(n - 1) + fib(n - 2) }
//! }
//!
//! assert_eq!(fib(64), 10610209857723);
//! ```
//!
//! # Guarantees
//!
//! - Zero-argument wrappers ([`OnceMemo`], [`TryOnceMemo`]) compute
//!   exactly once across all threads. The slot is double-checked:
//!   concurrent first callers serialize on it, and every later read is
//!   lock-free.
//! - Wrappers of one to nine arguments ([`Memo`], [`TryMemo`]) share a
//!   concurrent map. The miss path is check-compute-store without
//!   per-key locking, so two threads racing on the same fresh key may
//!   both run the function; each gets the result of its own invocation
//!   and the later store remains cached. Duplicate work under such a
//!   race is a performance hazard, never a correctness hazard.
//! - Failed computations are never cached: the error propagates to the
//!   caller that triggered it and the next call with the same key
//!   retries.
//!
//! Caches grow unbounded for the lifetime of their wrapper and are
//! never cleared. There is no eviction, expiry or invalidation.

mod cache;
mod hashed;
mod memo;
mod once;

#[cfg(feature = "testing")]
mod testing;

pub use crate::hashed::Hashed;
pub use crate::memo::{Callable, Memo, TryMemo};
pub use crate::once::{OnceMemo, TryOnceMemo};

#[cfg(feature = "macros")]
pub use memofn_macros::memoize;

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal {
    pub use once_cell::sync::OnceCell as OnceSlot;

    pub use crate::cache::{
        Cache, assert_argument, memoized, memoized_once, try_memoized, try_memoized_once,
    };

    #[cfg(feature = "testing")]
    pub use crate::testing::last_was_hit;
}
