use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Ident, ItemFn, LitStr, Result, Token};

struct NotebookAttr {
    name: Option<LitStr>,
}

impl Parse for NotebookAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self { name: None });
        }

        let name_key: Ident = input.parse()?;
        if name_key != "name" {
            return Err(input.error("expected `name = \"...\"`"));
        }
        input.parse::<Token![=]>()?;
        let name: LitStr = input.parse()?;
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("unexpected tokens"));
        }

        Ok(Self { name: Some(name) })
    }
}

/// Turns `fn body(nb: &mut NotebookCtx)` into a runnable `fn body()`.
///
/// The generated function names the notebook (explicit `name = "..."` or the source
/// file name), applies the command line flags understood by `NotebookConfig::with_args`
/// and opens the window.
#[proc_macro_attribute]
pub fn notebook(attr: TokenStream, item: TokenStream) -> TokenStream {
    let NotebookAttr { name } = parse_macro_input!(attr as NotebookAttr);
    let mut input = parse_macro_input!(item as ItemFn);
    let introbook = introbook_path();
    let original_ident = input.sig.ident.clone();
    let body_ident = Ident::new(
        &format!("__introbook_{}_body", original_ident),
        Span::call_site(),
    );
    input.sig.ident = body_ident.clone();
    let vis = input.vis.clone();

    let name_stmt: syn::Stmt = match name {
        Some(name) => syn::parse_quote!(let __introbook_name: &str = #name;),
        None => syn::parse_quote!(
            let __introbook_name: &str = std::path::Path::new(file!())
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file!());
        ),
    };

    let wrapper = quote! {
        #vis fn #original_ident() {
            #name_stmt
            let __introbook_config = match #introbook::NotebookConfig::new(__introbook_name)
                .with_args(std::env::args().skip(1))
            {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            if let Err(err) = __introbook_config.run(|__introbook_ctx| {
                #body_ident(__introbook_ctx);
            }) {
                eprintln!("notebook exited with an error: {err}");
            }
        }
    };

    TokenStream::from(quote! {
        #input
        #wrapper
    })
}

fn introbook_path() -> proc_macro2::TokenStream {
    match crate_name("introbook") {
        Ok(FoundCrate::Itself) => {
            if is_library_crate() {
                quote!(crate)
            } else {
                let ident = Ident::new(&package_name(), Span::call_site());
                quote!(::#ident)
            }
        }
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name.replace('-', "_"), Span::call_site());
            quote!(::#ident)
        }
        Err(_) => {
            let ident = Ident::new(&package_name(), Span::call_site());
            quote!(::#ident)
        }
    }
}

fn is_library_crate() -> bool {
    let crate_name = std::env::var("CARGO_CRATE_NAME").ok();
    let package_name = std::env::var("CARGO_PKG_NAME").ok();
    crate_name.is_some() && crate_name == package_name
}

fn package_name() -> String {
    std::env::var("CARGO_PKG_NAME")
        .unwrap_or_else(|_| "introbook".to_owned())
        .replace('-', "_")
}
