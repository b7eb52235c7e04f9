//! Procedural macros for `config_plugins`.
//!
//! `#[derive(ConfigSchema)]` lets a typed configuration struct take part in
//! plugin composition. It implements:
//!
//! - `config_plugins::ConfigSchema`, collecting per-field merge policies
//!   from `#[compose(...)]` attributes into a `MergeRules` tree;
//! - `config_plugins::Merge`, merging through the struct's serde form;
//! - `config_plugins::Structural`, reporting the struct as a mapping.
//!
//! Field keys follow serde's `rename` and `rename_all` attributes so rules
//! line up with the serialised shape.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `config_plugins::ConfigSchema`.
///
/// Field attributes:
///
/// - `#[compose(policy = "prefer_existing")]`, `"prefer_incoming"` or
///   `"recurse"` sets the field's merge policy;
/// - `#[compose(nested)]` grafts the field type's own rules beneath the
///   field. The type (or the `T` in `Option<T>`) must implement
///   `ConfigSchema`.
///
/// Container attribute `#[compose(crate = "path")]` points generated code at
/// a renamed dependency.
#[proc_macro_derive(ConfigSchema, attributes(compose))]
pub fn derive_config_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
