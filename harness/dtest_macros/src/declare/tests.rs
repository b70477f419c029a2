use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use super::*;

fn expand_str(attr: TokenStream2, item: TokenStream2) -> String {
    expand(attr, item).unwrap().to_string()
}

fn error_of(attr: TokenStream2, item: TokenStream2) -> String {
    expand(attr, item).unwrap_err().to_string()
}

fn normalized(tokens: TokenStream2) -> String {
    tokens.to_string()
}

#[test]
fn registers_function_under_given_name() {
    let out = expand_str(
        quote!("add"),
        quote! {
            fn add(t: &mut Descriptor) {
                expect!(t, 1 + 1 == 2);
            }
        },
    );

    assert!(out.contains(&normalized(quote!(inventory::submit!))));
    assert!(out.contains(&normalized(quote!(
        ::dtest::TestDef::new("add", add, ::core::file!(), ::core::line!())
    ))));
}

#[test]
fn unit_body_gets_outcome_return() {
    let out = expand_str(
        quote!("sub"),
        quote! {
            fn sub(t: &mut Descriptor) {
                expect!(t, 1 - 1 == 2);
            }
        },
    );

    assert!(out.contains(&normalized(quote!(-> ::dtest::Outcome))));
    assert!(out.contains(&normalized(quote!(::core::result::Result::Ok(())))));
    assert!(out.contains(&normalized(quote!(#[allow(unreachable_code)]))));
}

#[test]
fn explicit_unit_return_is_treated_like_none() {
    let out = expand_str(
        quote!("unit"),
        quote! {
            fn unit(t: &mut Descriptor) -> () {
                expect!(t, true);
            }
        },
    );

    assert!(out.contains(&normalized(quote!(-> ::dtest::Outcome))));
    assert!(!out.contains(&normalized(quote!(-> ()))));
    assert!(out.contains(&normalized(quote!(::core::result::Result::Ok(())))));
}

#[test]
fn missing_parameter_is_added() {
    let out = expand_str(quote!("empty"), quote!(fn empty() {}));

    assert!(out.contains(&normalized(quote!(fn empty(_: &mut ::dtest::Descriptor)))));
}

#[test]
fn explicit_outcome_is_left_alone() {
    let out = expand_str(
        quote!("manual"),
        quote! {
            fn manual(t: &mut Descriptor) -> dtest::Outcome {
                Ok(())
            }
        },
    );

    assert!(!out.contains("allow (unreachable_code)"));
    assert!(!out.contains(&normalized(quote!(::core::result::Result::Ok(())))));
    assert!(out.contains(&normalized(quote!(-> dtest::Outcome))));
}

#[test]
fn missing_name_is_rejected() {
    assert_eq!(
        error_of(quote!(), quote!(fn a() {})),
        "expected a test name, e.g. #[dtest::test(\"add\")]"
    );
}

#[test]
fn non_string_name_is_rejected() {
    assert_eq!(error_of(quote!(add), quote!(fn a() {})), "expected string literal");
}

#[test]
fn empty_name_is_rejected() {
    assert_eq!(
        error_of(quote!(""), quote!(fn a() {})),
        "test name must not be empty"
    );
}

#[test]
fn async_is_rejected() {
    assert_eq!(
        error_of(quote!("a"), quote!(async fn a() {})),
        "test functions cannot be async"
    );
}

#[test]
fn const_is_rejected() {
    assert_eq!(
        error_of(quote!("a"), quote!(const fn a() {})),
        "test functions cannot be const"
    );
}

#[test]
fn generics_are_rejected() {
    assert_eq!(
        error_of(quote!("a"), quote!(fn a<T>(t: &mut Descriptor) {})),
        "test functions cannot be generic"
    );
}

#[test]
fn extra_parameters_are_rejected() {
    assert_eq!(
        error_of(quote!("a"), quote!(fn a(t: &mut Descriptor, n: u32) {})),
        "test functions take at most one parameter, `&mut dtest::Descriptor`"
    );
}

#[test]
fn non_function_is_rejected() {
    assert!(expand(quote!("a"), quote!(struct A;)).is_err());
}
