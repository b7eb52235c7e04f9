//! Deep merge of configuration values.
//!
//! Mappings merge key by key, recursively. Sequences and scalars replace
//! whatever the target held, so arrays are never concatenated. Sources apply
//! left to right and the later source wins. Per-key [`MergePolicy`]
//! overrides let a caller keep an existing value or take an incoming mapping
//! wholesale.
//!
//! Merging is pure: the target and the sources are borrowed and a new value
//! is returned.
//!
//! ```rust
//! use config_plugins::merge::merge;
//! use serde_json::json;
//!
//! let target = json!({"a": {"x": 1}, "list": [1, 2]});
//! let source = json!({"a": {"y": 2}, "list": [3]});
//! let merged = merge(&target, [&source])?;
//! assert_eq!(merged, json!({"a": {"x": 1, "y": 2}, "list": [3]}));
//! assert_eq!(target, json!({"a": {"x": 1}, "list": [1, 2]}));
//! # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
//! ```

mod rules;
mod typed;
mod value;

pub use rules::{MergePolicy, MergeRules};
pub use typed::{ConfigSchema, Merge};
#[doc(hidden)]
pub use typed::merge_serialized;

use crate::ComposeResult;

/// Merge `sources` into a copy of `target` using default rules.
///
/// Each source may be a reference or an `Option` of one; `None` sources are
/// skipped, as are `null` JSON sources.
///
/// # Errors
///
/// Returns [`crate::ComposeError::MergeTypeMismatch`] when a mapping would
/// be merged into a key holding a sequence or scalar, or when the root of
/// the target or a source is not a mapping.
pub fn merge<'a, C, I, S>(target: &C, sources: I) -> ComposeResult<C>
where
    C: Merge + 'a,
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a C>>,
{
    merge_with(target, sources, &MergeRules::default())
}

/// Merge `sources` into a copy of `target` under explicit `rules`.
///
/// ```rust
/// use config_plugins::merge::merge_with;
/// use config_plugins::{MergePolicy, MergeRules};
/// use serde_json::json;
///
/// let defaults = json!({"mode": "production", "server": {"port": 3000}});
/// let user = json!({"mode": "development", "server": {"host": true}});
/// let rules = MergeRules::new().set("mode", MergePolicy::PreferExisting);
///
/// let merged = merge_with(&defaults, [&user], &rules)?;
/// assert_eq!(
///     merged,
///     json!({"mode": "production", "server": {"port": 3000, "host": true}})
/// );
/// # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
/// ```
///
/// # Errors
///
/// As for [`merge`].
pub fn merge_with<'a, C, I, S>(target: &C, sources: I, rules: &MergeRules) -> ComposeResult<C>
where
    C: Merge + 'a,
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a C>>,
{
    target.merge_layers(sources.into_iter().filter_map(Into::into), rules)
}

/// Merge `sources` into a copy of `target` using the rules `C` declares.
///
/// # Errors
///
/// As for [`merge`].
pub fn merge_declared<'a, C, I, S>(target: &C, sources: I) -> ComposeResult<C>
where
    C: Merge + ConfigSchema + 'a,
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a C>>,
{
    merge_with(target, sources, &C::merge_rules())
}
