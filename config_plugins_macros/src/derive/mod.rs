//! Expansion of `#[derive(ConfigSchema)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Expand the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let schema = parse::parse_input(input)?;
    let krate = crate_path::resolve(schema.attrs.crate_path.as_ref());
    Ok(generate::impls(&schema, &krate))
}
