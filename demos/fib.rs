use std::time::Instant;

use memofn::memoize;

#[memoize]
fn fib(n: u64) -> u64 {
    if n <= 2 { 1 } else { fib(n - 1) + fib(n - 2) }
}

fn main() {
    for n in [10, 40, 40, 90] {
        let start = Instant::now();
        let value = fib(n);
        println!("fib({n}) = {value} [{:?}]", start.elapsed());
    }
}
