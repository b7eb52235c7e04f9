//! Serde attribute parsing helpers.
//!
//! Merge rules are keyed by the names serde emits, so the derive has to
//! honour `#[serde(rename = "...")]` and `#[serde(rename_all = "...")]`
//! exactly as serialisation does.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Field, LitStr, Token};

/// Supported `#[serde(rename_all = "...")]` rules for struct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!("unsupported serde rename_all value '{other}'"),
            )),
        }
    }

    fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Read the container's `rename_all`, preferring the `serialize` half of
/// `rename_all(serialize = "...", deserialize = "...")`.
pub(crate) fn rename_rule(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut rule = None;
    for_each_serde_meta(attrs, |meta| {
        if meta.path.is_ident("rename_all") {
            rule = serialized_literal(meta)?
                .map(|lit| SerdeRenameAll::parse(&lit))
                .transpose()?
                .or(rule);
            return Ok(());
        }
        super::discard_unknown(meta)
    })?;
    Ok(rule)
}

/// What serde does with one field when serialising.
#[derive(Debug, Default)]
pub(crate) struct SerdeField {
    rename: Option<String>,
    pub skipped: bool,
    pub flattened: bool,
}

impl SerdeField {
    /// Collect the serde attributes of `field` in one pass.
    pub(crate) fn read(field: &Field) -> syn::Result<Self> {
        let mut out = Self::default();
        for_each_serde_meta(&field.attrs, |meta| {
            if meta.path.is_ident("rename") {
                out.rename = serialized_literal(meta)?.map(|lit| lit.value()).or(out.rename.take());
                return Ok(());
            }
            if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                out.skipped = true;
            } else if meta.path.is_ident("flatten") {
                out.flattened = true;
            }
            super::discard_unknown(meta)
        })?;
        Ok(out)
    }

    /// The JSON key serde writes for `field`.
    pub(crate) fn key(&self, field: &Field, rule: Option<SerdeRenameAll>) -> syn::Result<String> {
        if let Some(rename) = &self.rename {
            return Ok(rename.clone());
        }
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "unnamed fields are not supported"))?;
        let name = ident.unraw().to_string();
        Ok(rule.map_or_else(|| name.clone(), |case| case.apply(&name)))
    }
}

fn for_each_serde_meta<F>(attrs: &[Attribute], mut visit: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .try_for_each(|attr| attr.parse_nested_meta(|meta| visit(&meta)))
}

/// `name = "lit"` yields the literal; `name(serialize = "lit", ..)` yields
/// the serialise half; a bare `name` yields nothing.
fn serialized_literal(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    if !meta.input.peek(syn::token::Paren) {
        return Ok(None);
    }
    let mut found = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            found = Some(nested.value()?.parse::<LitStr>()?);
            return Ok(());
        }
        super::discard_unknown(&nested)
    })?;
    Ok(found)
}
