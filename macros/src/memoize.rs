use super::*;

/// Memoize a function.
pub fn expand(mut func: syn::ItemFn) -> Result<proc_macro2::TokenStream> {
    let mut args = vec![];
    let mut types = vec![];
    for input in &func.sig.inputs {
        let typed = match input {
            syn::FnArg::Typed(typed) => typed,
            syn::FnArg::Receiver(_) => {
                bail!(input, "methods are not supported")
            }
        };

        let name = match typed.pat.as_ref() {
            syn::Pat::Ident(syn::PatIdent {
                by_ref: None,
                mutability: None,
                ident,
                subpat: None,
                ..
            }) => ident.clone(),
            pat => bail!(pat, "only simple identifiers are supported"),
        };

        args.push(name);
        types.push(typed.ty.as_ref().clone());
    }

    if args.len() > 9 {
        bail!(func.sig.inputs, "at most nine arguments are supported");
    }

    let output: syn::Type = match &func.sig.output {
        syn::ReturnType::Default => parse_quote! { () },
        syn::ReturnType::Type(_, ty) => (**ty).clone(),
    };

    // A return type spelled as a `Result` caches only its `Ok` value,
    // so failures propagate uncached and the next call retries.
    let cached = ok_type(&output).cloned();
    let value = cached.as_ref().unwrap_or(&output);
    let body = &func.block;

    let block: syn::Block = if args.is_empty() {
        let driver = if cached.is_some() {
            quote! { try_memoized_once }
        } else {
            quote! { memoized_once }
        };

        parse_quote! { {
            static __SLOT: ::memofn::internal::OnceSlot<#value> =
                ::memofn::internal::OnceSlot::new();
            ::memofn::internal::#driver(&__SLOT, || #body)
        } }
    } else {
        let driver = if cached.is_some() {
            quote! { try_memoized }
        } else {
            quote! { memoized }
        };

        // Assertions producing readable errors when an argument type
        // cannot be used as a key element.
        let asserts = types.iter().map(|ty| {
            quote! { ::memofn::internal::assert_argument::<#ty>(); }
        });

        parse_quote! { {
            #(#asserts)*
            static __CACHE: ::memofn::internal::Cache<(#(#types,)*), #value> =
                ::memofn::internal::Cache::new();
            ::memofn::internal::#driver(
                &__CACHE,
                (#(#args.clone(),)*),
                move || #body,
            )
        } }
    };

    func.block = Box::new(block);
    Ok(quote! { #func })
}

/// The `Ok` type of a return type spelled as a `Result`.
fn ok_type(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    // The first type argument is the `Ok` type, also for single-argument
    // aliases in the style of `std::io::Result<T>`.
    arguments.args.iter().find_map(|argument| match argument {
        syn::GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
