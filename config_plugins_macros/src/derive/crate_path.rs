//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[compose(crate = "...")]` attribute value into
//! the tokens generated code uses in place of `::config_plugins`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::config_plugins }, |path| quote! { #path })
}
