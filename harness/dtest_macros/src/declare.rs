//! `#[dtest::test("name")]` expansion.
//!
//! Generates the test function, normalized to
//! `fn(&mut dtest::Descriptor) -> dtest::Outcome`, followed by an
//! `inventory::submit!` of its `TestDef`.
//!
//! # Note
//!
//! Generated paths start with `::dtest`, so the invoking crate must depend
//! on `dtest` under that name.

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_quote, Block, FnArg, ItemFn, LitStr, ReturnType, Signature, Type};

/// Main entry point for the test attribute.
pub fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let name = parse_name(attr)?;
    let mut func: ItemFn = syn::parse2(item)?;
    validate_signature(&func.sig)?;

    // Bodies that ignore the descriptor may omit the parameter.
    if func.sig.inputs.is_empty() {
        func.sig.inputs.push(parse_quote!(_: &mut ::dtest::Descriptor));
    }

    // `expect!` returns early, so a unit body (implicit or `-> ()`) needs an
    // `Outcome` return type and a trailing `Ok(())`.
    if returns_unit(&func.sig.output) {
        func.sig.output = parse_quote!(-> ::dtest::Outcome);
        let body = &func.block;
        let block: Block = parse_quote!({
            #body
            ::core::result::Result::Ok(())
        });
        func.block = Box::new(block);
        func.attrs.push(parse_quote!(#[allow(unreachable_code)]));
    }

    let ident = &func.sig.ident;
    Ok(quote! {
        #func

        ::dtest::__private::inventory::submit! {
            ::dtest::TestDef::new(#name, #ident, ::core::file!(), ::core::line!())
        }
    })
}

fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(tuple) if tuple.elems.is_empty()),
    }
}

/// Parse the `"name"` argument.
fn parse_name(attr: TokenStream2) -> syn::Result<LitStr> {
    if attr.is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            "expected a test name, e.g. #[dtest::test(\"add\")]",
        ));
    }
    let name: LitStr = syn::parse2(attr)?;
    if name.value().is_empty() {
        return Err(syn::Error::new_spanned(&name, "test name must not be empty"));
    }
    Ok(name)
}

fn validate_signature(sig: &Signature) -> syn::Result<()> {
    if let Some(token) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            token,
            "test functions cannot be async",
        ));
    }
    if let Some(token) = &sig.constness {
        return Err(syn::Error::new_spanned(
            token,
            "test functions cannot be const",
        ));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "test functions cannot be generic",
        ));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new_spanned(
            variadic,
            "test functions cannot be variadic",
        ));
    }
    if sig.inputs.len() > 1 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "test functions take at most one parameter, `&mut dtest::Descriptor`",
        ));
    }
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Err(syn::Error::new_spanned(
            receiver,
            "test functions cannot take `self`",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
