extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("memofn: ", $fmt) $($tts)*)
        ))
    }
}

mod memoize;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Result, parse_quote};

/// Memoize a pure function of up to nine arguments.
///
/// Results are cached by the ordered tuple of arguments. Each argument
/// type must implement `Eq`, `Hash` and `Clone`, and the return type
/// must implement `Clone`. A zero-argument function is computed at most
/// once across all threads.
///
/// ```
/// #[memofn::memoize]
/// fn sum(a: u32, b: u32) -> u32 {
///     a + b
/// }
/// ```
///
/// A function whose return type is spelled `Result` caches only `Ok`
/// values: errors propagate to the caller and the next call with the
/// same arguments retries.
#[proc_macro_attribute]
pub fn memoize(_: TokenStream, stream: TokenStream) -> TokenStream {
    let func = syn::parse_macro_input!(stream as syn::ItemFn);
    memoize::expand(func)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
