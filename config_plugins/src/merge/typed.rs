//! Merge support for typed configuration values.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::MergeRules;
use super::value::merge_values;
use crate::{ComposeResult, ComposeResultExt};

/// Configuration types the merge utility can combine.
///
/// Implemented for [`serde_json::Value`]; `#[derive(ConfigSchema)]`
/// implements it for structs by way of their serialised form.
pub trait Merge: Sized {
    /// Merge `sources` into a copy of `self`, left to right, under `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::MergeTypeMismatch`] when a mapping
    /// meets a non-mapping, and [`crate::ComposeError::Serialization`] when
    /// a typed value cannot round-trip through JSON.
    fn merge_layers<'a, I>(&self, sources: I, rules: &MergeRules) -> ComposeResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a;
}

impl Merge for Value {
    fn merge_layers<'a, I>(&self, sources: I, rules: &MergeRules) -> ComposeResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        merge_values(self, sources, rules)
    }
}

/// Typed configurations that declare their own per-field merge policies.
///
/// Usually derived:
///
/// ```rust
/// use config_plugins::{ConfigSchema, MergePolicy};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Default, Serialize, Deserialize, ConfigSchema)]
/// #[serde(rename_all = "camelCase")]
/// struct Output {
///     #[compose(policy = "prefer_existing")]
///     public_path: Option<String>,
///     clean: Option<bool>,
/// }
///
/// let rules = Output::merge_rules();
/// assert_eq!(rules.policy("publicPath"), MergePolicy::PreferExisting);
/// ```
pub trait ConfigSchema {
    /// Rules applied by [`crate::merge::merge_declared`].
    fn merge_rules() -> MergeRules;
}

/// Merge typed values through their JSON form.
///
/// `null` fields in the sources are dropped first, so an unset `Option`
/// leaves the target untouched. Generated `Merge` impls call this.
///
/// # Errors
///
/// Propagates serialisation failures and merge mismatches.
#[doc(hidden)]
pub fn merge_serialized<'a, T, I>(target: &T, sources: I, rules: &MergeRules) -> ComposeResult<T>
where
    T: Serialize + DeserializeOwned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let base = serde_json::to_value(target).into_compose()?;
    let layers = sources
        .into_iter()
        .map(|source| serde_json::to_value(source).map(prune_nulls))
        .collect::<Result<Vec<_>, _>>()
        .into_compose()?;
    let merged = merge_values(&base, &layers, rules)?;
    serde_json::from_value(merged).into_compose()
}

fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}
