use proc_macro::TokenStream;
use quote::quote;
use syn::{
    DeriveInput, Ident, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Derive macro for implementing the `Request` trait.
///
/// By default the type's name becomes the request key:
///
/// ```rust,ignore
/// #[derive(Request)]
/// struct CreatePost;          // key: "CreatePost"
/// ```
///
/// Use `#[request(key = "...")]` to pick the key explicitly:
///
/// ```rust,ignore
/// #[derive(Request)]
/// #[request(key = "post.create")]
/// struct CreatePost;          // key: "post.create"
/// ```
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut key = None;
    for attr in &input.attrs {
        if attr.path().is_ident("request") {
            match attr.parse_args::<RequestArgs>() {
                Ok(args) => key = args.key,
                Err(err) => return err.to_compile_error().into(),
            }
        }
    }
    let key = key.unwrap_or_else(|| name.to_string());

    let expanded = quote! {
        impl #impl_generics ::medius::Request for #name #ty_generics #where_clause {
            fn key(&self) -> &str {
                #key
            }
        }
    };

    TokenStream::from(expanded)
}

struct RequestArgs {
    key: Option<String>,
}

impl Parse for RequestArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut key = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "key" => {
                    let lit: LitStr = input.parse()?;
                    key = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(RequestArgs { key })
    }
}
