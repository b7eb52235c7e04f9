//! Parsing of `#[compose(...)]` and the serde attributes it depends on.

use syn::parenthesized;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr, Token, Type};

mod serde_attrs;
mod type_utils;

pub(crate) use type_utils::option_inner;

/// Merge policy requested for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Policy {
    Recurse,
    PreferIncoming,
    PreferExisting,
}

impl Policy {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "recurse" => Ok(Self::Recurse),
            "prefer_incoming" => Ok(Self::PreferIncoming),
            "prefer_existing" => Ok(Self::PreferExisting),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unknown merge policy '{other}'; expected \"recurse\", \
\"prefer_incoming\" or \"prefer_existing\""
                ),
            )),
        }
    }

    /// Name of the matching `MergePolicy` variant.
    pub(crate) const fn variant(self) -> &'static str {
        match self {
            Self::Recurse => "Recurse",
            Self::PreferIncoming => "PreferIncoming",
            Self::PreferExisting => "PreferExisting",
        }
    }
}

#[derive(Default)]
pub(crate) struct StructAttrs {
    pub crate_path: Option<syn::Path>,
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub policy: Option<Policy>,
    pub nested: bool,
}

impl FieldAttrs {
    const fn is_empty(&self) -> bool {
        self.policy.is_none() && !self.nested
    }
}

/// A field that contributes to the generated rules.
pub(crate) struct SchemaField<'a> {
    pub key: String,
    pub ty: &'a Type,
    pub attrs: FieldAttrs,
}

impl SchemaField<'_> {
    pub(crate) const fn attrs_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Everything the generator needs from the derive input.
pub(crate) struct SchemaInput<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<SchemaField<'a>>,
}

/// Iterate all `#[compose(...)]` attributes once and apply a callback.
fn parse_compose<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("compose")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
pub(crate) fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn unknown_key(meta: &syn::meta::ParseNestedMeta) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("?"), ToString::to_string);
    meta.error(format!("unknown compose attribute `{key}`"))
}

/// Extracts `#[compose(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_compose(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let value = meta.value()?.parse::<LitStr>()?;
            out.crate_path = Some(value.parse()?);
            Ok(())
        } else {
            Err(unknown_key(meta))
        }
    })?;
    Ok(out)
}

/// Extracts `#[compose(...)]` metadata applied to a field.
///
/// Unknown keys are rejected: a misspelt policy would otherwise silently
/// fall back to recursive merging.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_compose(attrs, |meta| {
        if meta.path.is_ident("policy") {
            let value = meta.value()?.parse::<LitStr>()?;
            out.policy = Some(Policy::parse(&value)?);
            Ok(())
        } else if meta.path.is_ident("nested") {
            out.nested = true;
            Ok(())
        } else {
            Err(unknown_key(meta))
        }
    })?;
    Ok(out)
}

/// Parse the derive input into a [`SchemaInput`].
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<SchemaInput<'_>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ConfigSchema can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "ConfigSchema requires named fields",
        ));
    };
    let rename_all = serde_attrs::rename_rule(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let attrs = parse_field_attrs(&field.attrs)?;
        let serde = serde_attrs::SerdeField::read(field)?;
        if serde.skipped || serde.flattened {
            if !attrs.is_empty() {
                let why = if serde.skipped { "skipped" } else { "flattened" };
                return Err(syn::Error::new_spanned(
                    field,
                    format!("compose attributes have no effect on {why} fields"),
                ));
            }
            continue;
        }
        fields.push(SchemaField {
            key: serde.key(field, rename_all)?,
            ty: &field.ty,
            attrs,
        });
    }
    Ok(SchemaInput {
        ident: &input.ident,
        generics: &input.generics,
        attrs: parse_struct_attrs(&input.attrs)?,
        fields,
    })
}
