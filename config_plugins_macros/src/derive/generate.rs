//! Token generation for the `ConfigSchema`, `Merge` and `Structural` impls.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Generics, Ident, parse_quote};

use super::parse::{SchemaField, SchemaInput, option_inner};

/// Statements that add one field's rules to a `rules` binding.
fn field_rules(field: &SchemaField<'_>, krate: &TokenStream) -> TokenStream {
    let key = &field.key;
    let policy = field.attrs.policy.map(|policy| {
        let variant = Ident::new(policy.variant(), Span::call_site());
        quote! {
            rules.set_path([#key], #krate::MergePolicy::#variant);
        }
    });
    let nested = field.attrs.nested.then(|| {
        let ty = option_inner(field.ty).unwrap_or(field.ty);
        quote! {
            rules = rules.nest(#key, <#ty as #krate::ConfigSchema>::merge_rules());
        }
    });
    quote! { #policy #nested }
}

/// Generics extended with the serde bounds the `Merge` impl relies on.
fn serde_bounded(schema: &SchemaInput<'_>, krate: &TokenStream) -> Generics {
    let mut generics = schema.generics.clone();
    generics.make_where_clause().predicates.push(parse_quote! {
        Self: #krate::__private::serde::Serialize
            + #krate::__private::serde::de::DeserializeOwned
    });
    generics
}

/// Generate every impl for the parsed struct.
pub(crate) fn impls(schema: &SchemaInput<'_>, krate: &TokenStream) -> TokenStream {
    let ident = schema.ident;
    let (impl_generics, ty_generics, where_clause) = schema.generics.split_for_impl();
    let bounded = serde_bounded(schema, krate);
    let (_, _, merge_where) = bounded.split_for_impl();
    let rules = schema.fields.iter().map(|field| field_rules(field, krate));
    let mutable = schema
        .fields
        .iter()
        .any(|field| !field.attrs_empty())
        .then(|| quote!(mut));

    quote! {
        impl #impl_generics #krate::ConfigSchema for #ident #ty_generics #where_clause {
            fn merge_rules() -> #krate::MergeRules {
                let #mutable rules = #krate::MergeRules::new();
                #( #rules )*
                rules
            }
        }

        impl #impl_generics #krate::Merge for #ident #ty_generics #merge_where {
            fn merge_layers<'__src, __I>(
                &self,
                sources: __I,
                rules: &#krate::MergeRules,
            ) -> #krate::ComposeResult<Self>
            where
                __I: ::core::iter::IntoIterator<Item = &'__src Self>,
                Self: '__src,
            {
                #krate::merge::merge_serialized(self, sources, rules)
            }
        }

        impl #impl_generics #krate::Structural for #ident #ty_generics #where_clause {}
    }
}
