use darling::ast::NestedMeta;
use darling::FromMeta;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Expr, ItemFn, Lit, Meta, ReturnType};

/// Expand the #[tcl::global_function] attribute.
pub fn expand_global_function(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(list) => list,
        Err(e) => return darling::Error::from(e).write_errors().into(),
    };
    let attrs = match GlobalFunctionAttrs::from_list(&attr_args) {
        Ok(attrs) => attrs,
        Err(e) => return e.write_errors().into(),
    };

    expand_global_function_impl(input, attrs)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

#[derive(Debug, Default, FromMeta)]
struct GlobalFunctionAttrs {
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    description: Option<String>,
}

fn expand_global_function_impl(
    input: ItemFn,
    attrs: GlobalFunctionAttrs,
) -> syn::Result<TokenStream2> {
    let fn_name = &input.sig.ident;
    let fn_name_str = fn_name.to_string();
    let struct_name = syn::Ident::new(
        &format!("{}Function", to_pascal_case(&fn_name_str)),
        fn_name.span(),
    );
    let vis = &input.vis;

    if input.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "Global functions must not be async",
        ));
    }

    if !input.sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.inputs,
            "Global functions must take no arguments",
        ));
    }

    if !input.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.generics,
            "Global functions must not be generic",
        ));
    }

    if matches!(input.sig.output, ReturnType::Default) {
        return Err(syn::Error::new_spanned(
            &input.sig,
            "Global functions must return a value convertible into String",
        ));
    }

    let name = attrs.name.unwrap_or(fn_name_str);
    if name.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.ident,
            "Global function name must not be empty",
        ));
    }

    let description = match attrs.description.or_else(|| doc_comment(&input.attrs)) {
        Some(desc) => quote! { .with_description(#desc) },
        None => quote! {},
    };

    Ok(quote! {
        #input

        #[doc = concat!("Global function `", #name, "`.")]
        #vis struct #struct_name;

        impl tcl::tcl_core::GlobalFunction for #struct_name {
            fn info() -> tcl::tcl_core::FunctionInfo {
                tcl::tcl_core::FunctionInfo::new(#name) #description
            }

            fn call() -> ::std::string::String {
                ::std::convert::Into::into(#fn_name())
            }
        }
    })
}

/// Join the `///` lines of a doc comment, or `None` if there are none.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect();

    let doc = lines.join(" ").trim().to_string();
    if doc.is_empty() {
        None
    } else {
        Some(doc)
    }
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("list_global_names"), "ListGlobalNames");
        assert_eq!(to_pascal_case("simple"), "Simple");
    }

    #[test]
    fn test_doc_comment() {
        let item: ItemFn = syn::parse_quote! {
            /// Returns a fixed greeting.
            /// Never fails.
            fn hello_world() -> String { String::new() }
        };
        assert_eq!(
            doc_comment(&item.attrs).as_deref(),
            Some("Returns a fixed greeting. Never fails.")
        );

        let item: ItemFn = syn::parse_quote! {
            fn bare() -> String { String::new() }
        };
        assert!(doc_comment(&item.attrs).is_none());
    }

    #[test]
    fn test_expand_uses_given_name() {
        let item: ItemFn = syn::parse_quote! {
            pub fn hello_world() -> String { "Hello, World!".to_string() }
        };
        let attrs = GlobalFunctionAttrs {
            name: Some("testing.HelloWorld".to_string()),
            description: None,
        };

        let tokens = expand_global_function_impl(item, attrs).unwrap().to_string();
        assert!(tokens.contains("struct HelloWorldFunction"));
        assert!(tokens.contains("\"testing.HelloWorld\""));
    }

    #[test]
    fn test_expand_defaults_name_to_ident() {
        let item: ItemFn = syn::parse_quote! {
            fn ping() -> &'static str { "pong" }
        };

        let tokens = expand_global_function_impl(item, GlobalFunctionAttrs::default())
            .unwrap()
            .to_string();
        assert!(tokens.contains("struct PingFunction"));
        assert!(tokens.contains("\"ping\""));
    }

    #[test]
    fn test_rejects_arguments() {
        let item: ItemFn = syn::parse_quote! {
            fn greet(name: String) -> String { name }
        };
        assert!(expand_global_function_impl(item, GlobalFunctionAttrs::default()).is_err());
    }

    #[test]
    fn test_rejects_async_and_unit_return() {
        let item: ItemFn = syn::parse_quote! {
            async fn later() -> String { String::new() }
        };
        assert!(expand_global_function_impl(item, GlobalFunctionAttrs::default()).is_err());

        let item: ItemFn = syn::parse_quote! {
            fn nothing() {}
        };
        assert!(expand_global_function_impl(item, GlobalFunctionAttrs::default()).is_err());
    }
}
