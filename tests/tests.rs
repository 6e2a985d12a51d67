//! Run with `cargo test --all-features`.

use std::sync::atomic::{AtomicUsize, Ordering};

use memofn::memoize;
use serial_test::serial;

macro_rules! test {
    (miss: $call:expr, $result:expr) => {{
        assert_eq!($call, $result);
        assert!(!memofn::internal::last_was_hit());
    }};
    (hit: $call:expr, $result:expr) => {{
        assert_eq!($call, $result);
        assert!(memofn::internal::last_was_hit());
    }};
}

/// Test basic memoization.
#[test]
#[serial]
fn test_basic() {
    #[memoize]
    fn empty() -> String {
        format!("The world is {}", "big")
    }

    #[memoize]
    fn double(x: u32) -> u32 {
        2 * x
    }

    #[memoize]
    fn sum(a: u32, b: u32) -> u32 {
        a + b
    }

    #[memoize]
    fn fib(n: u32) -> u32 {
        if n <= 2 { 1 } else { fib(n - 1) + fib(n - 2) }
    }

    test!(miss: empty(), "The world is big");
    test!(hit: empty(), "The world is big");
    test!(hit: empty(), "The world is big");

    test!(miss: double(2), 4);
    test!(miss: double(4), 8);
    test!(hit: double(2), 4);

    test!(miss: sum(2, 4), 6);
    test!(miss: sum(2, 3), 5);
    test!(hit: sum(2, 3), 5);
    test!(miss: sum(4, 2), 6);

    test!(miss: fib(5), 5);
    test!(hit: fib(3), 2);
    test!(miss: fib(8), 21);
    test!(hit: fib(7), 13);
}

/// Argument order is part of the key.
#[test]
#[serial]
fn test_order_sensitivity() {
    #[memoize]
    fn concat(a: u32, b: u32) -> u32 {
        10 * a + b
    }

    test!(miss: concat(0, 1), 1);
    test!(miss: concat(1, 0), 10);
    test!(hit: concat(0, 1), 1);
    test!(hit: concat(1, 0), 10);
}

/// Mixed hits and misses across a three-argument key space.
#[test]
#[serial]
fn test_mixed_hits_and_misses() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    #[memoize]
    fn add3(a: u32, b: u32, c: u32) -> u32 {
        CALLS.fetch_add(1, Ordering::SeqCst);
        a + b + c
    }

    test!(miss: add3(0, 0, 0), 0);
    test!(hit: add3(0, 0, 0), 0);
    test!(hit: add3(0, 0, 0), 0);

    test!(miss: add3(0, 0, 1), 1);
    test!(hit: add3(0, 0, 1), 1);
    test!(hit: add3(0, 0, 1), 1);

    test!(miss: add3(0, 15, 15), 30);
    test!(hit: add3(0, 15, 15), 30);
    test!(hit: add3(0, 15, 15), 30);

    test!(hit: add3(0, 0, 0), 0);
    test!(hit: add3(0, 0, 0), 0);
    test!(hit: add3(0, 0, 0), 0);

    assert_eq!(CALLS.load(Ordering::SeqCst), 3);
}

/// The widest supported arity.
#[test]
#[serial]
fn test_nine_arguments() {
    #[memoize]
    #[allow(clippy::too_many_arguments)]
    fn digits(
        a: u64,
        b: u64,
        c: u64,
        d: u64,
        e: u64,
        f: u64,
        g: u64,
        h: u64,
        i: u64,
    ) -> u64 {
        (((((((a * 10 + b) * 10 + c) * 10 + d) * 10 + e) * 10 + f) * 10 + g) * 10 + h) * 10 + i
    }

    test!(miss: digits(1, 2, 3, 4, 5, 6, 7, 8, 9), 123456789);
    test!(hit: digits(1, 2, 3, 4, 5, 6, 7, 8, 9), 123456789);
    test!(miss: digits(9, 8, 7, 6, 5, 4, 3, 2, 1), 987654321);
}

/// Errors propagate and are never cached.
#[test]
#[serial]
fn test_error_then_retry() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    #[memoize]
    fn parse(input: &'static str) -> Result<u32, std::num::ParseIntError> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        input.parse()
    }

    assert!(parse("nope").is_err());
    assert!(parse("nope").is_err());
    test!(miss: parse("42"), Ok(42));
    test!(hit: parse("42"), Ok(42));
    assert_eq!(CALLS.load(Ordering::SeqCst), 3);
}

/// A failing zero-argument computation leaves the slot empty.
#[test]
#[serial]
fn test_once_error_then_retry() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    #[memoize]
    fn load() -> Result<u32, String> {
        if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(String::from("transient"))
        } else {
            Ok(7)
        }
    }

    assert_eq!(load(), Err(String::from("transient")));
    test!(miss: load(), Ok(7));
    test!(hit: load(), Ok(7));
    test!(hit: load(), Ok(7));
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}
