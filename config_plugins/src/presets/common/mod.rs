//! Building blocks shared by the bundler presets.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::options::WithEnvOptions;
use crate::merge::merge;
use crate::{ComposeError, ComposeResult, Context, IntoPluginError, Plugin, PluginOutcome, Shape};

/// Module extensions every preset resolves, in lookup order.
pub const COMMON_EXTENSIONS: [&str; 5] = [".tsx", ".ts", ".jsx", ".js", ".json"];

/// Script extensions that React presets move to the front of the list.
pub(crate) const SCRIPT_EXTENSIONS: [&str; 4] = [".tsx", ".ts", ".jsx", ".js"];

/// Source root assumed when the context does not name one.
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Env variable prefix used by [`env_defines`] when none is configured.
pub const DEFAULT_ENV_PREFIX: &str = "REACT_APP_";

/// `@` and `~` aliases pointing at `/<source_root>`.
///
/// ```rust
/// use config_plugins::presets::common::common_aliases;
/// use serde_json::json;
///
/// assert_eq!(common_aliases("app"), json!({"@": "/app", "~": "/app"}));
/// ```
#[must_use]
pub fn common_aliases(source_root: &str) -> Value {
    let target = format!("/{}", source_root.trim_start_matches('/'));
    json!({ "@": target, "~": target })
}

/// [`common_aliases`] for the context's source root.
pub(crate) fn context_aliases(context: &Context) -> Value {
    common_aliases(context.source_root().map_or(DEFAULT_SOURCE_ROOT, |root| root.as_str()))
}

/// Source of variables for [`env_defines`].
///
/// Tests inject a map; production code uses [`ProcessEnv`].
pub trait VariableSource {
    /// Every `(name, value)` pair the source knows about.
    fn variables(&self) -> Vec<(String, String)>;
}

/// Reads the process environment each time it is queried.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
    fn variables(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }
}

impl VariableSource for BTreeMap<String, String> {
    fn variables(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<S: std::hash::BuildHasher> VariableSource for HashMap<String, String, S> {
    fn variables(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Compile-time defines for prefixed variables.
///
/// Keys take the form `process.env.NAME` and values are JSON-quoted so a
/// bundler can substitute them verbatim. Explicit `variables` are always
/// included and win over the source.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use config_plugins::presets::common::env_defines;
/// use config_plugins::presets::WithEnvOptions;
///
/// let vars = BTreeMap::from([
///     ("REACT_APP_API".to_owned(), "https://api".to_owned()),
///     ("HOME".to_owned(), "/root".to_owned()),
/// ]);
/// let defines = env_defines(&WithEnvOptions::default(), &vars);
/// assert_eq!(defines["process.env.REACT_APP_API"], "\"https://api\"");
/// assert!(!defines.contains_key("process.env.HOME"));
/// ```
#[must_use]
pub fn env_defines(options: &WithEnvOptions, source: &impl VariableSource) -> Map<String, Value> {
    let prefix = options.prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    let mut defines = Map::new();
    let mut define = |name: &str, value: &str| {
        defines.insert(format!("process.env.{name}"), quoted(value));
    };
    if options.systemvars.unwrap_or(true) {
        let mut vars = source.variables();
        vars.sort();
        for (name, value) in vars.iter().filter(|(name, _)| name.starts_with(prefix)) {
            define(name, value);
        }
    }
    for (name, value) in &options.variables {
        define(name, value);
    }
    defines
}

/// Plugin merging [`env_defines`] into the configuration. Created by
/// [`with_env`].
#[derive(Clone, Debug)]
pub struct WithEnv<S> {
    options: WithEnvOptions,
    source: S,
    define_key: Vec<String>,
}

/// Merge prefixed variables from `source` under the dotted `define_key`.
///
/// Vite reads defines from `define`; rsbuild from `source.define`.
#[must_use]
pub fn with_env<S: VariableSource>(
    options: WithEnvOptions,
    source: S,
    define_key: &str,
) -> WithEnv<S> {
    WithEnv {
        options,
        source,
        define_key: define_key.split('.').map(str::to_owned).collect(),
    }
}

impl<S, X> Plugin<Value, X> for WithEnv<S>
where
    S: VariableSource,
{
    fn apply(&self, config: Value, _context: &X) -> PluginOutcome<Value> {
        let defines = env_defines(&self.options, &self.source);
        if defines.is_empty() {
            return Ok(config);
        }
        let layer = self
            .define_key
            .iter()
            .rev()
            .fold(Value::Object(defines), |inner, key| json!({ key: inner }));
        merge(&config, [&layer]).into_plugin()
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("with-env")
    }
}

fn rule<const N: usize>(base: [(&str, &str); N], extra: Value) -> Value {
    let mut rule: Map<String, Value> = base
        .into_iter()
        .map(|(key, value)| (key.to_owned(), json!(value)))
        .collect();
    if let Value::Object(extra) = extra {
        rule.extend(extra);
    }
    Value::Object(rule)
}

/// Module rule for script sources outside `node_modules`.
///
/// Keys in `extra` replace the defaults, mirroring object spread. A
/// non-mapping `extra` adds nothing.
///
/// ```rust
/// use config_plugins::presets::common::ts_js_rule;
/// use serde_json::json;
///
/// let rule = ts_js_rule(json!({"loader": "builtin:swc-loader"}));
/// assert_eq!(rule["exclude"], "node_modules");
/// assert_eq!(rule["loader"], "builtin:swc-loader");
/// ```
#[must_use]
pub fn ts_js_rule(extra: Value) -> Value {
    rule(
        [("test", r"\.(js|jsx|ts|tsx)$"), ("exclude", "node_modules")],
        extra,
    )
}

/// Module rule for plain CSS.
#[must_use]
pub fn css_rule(extra: Value) -> Value {
    rule([("test", r"\.css$")], extra)
}

/// Module rule for Sass and SCSS.
#[must_use]
pub fn sass_rule(extra: Value) -> Value {
    rule([("test", r"\.s[ac]ss$")], extra)
}

/// Module rule emitting images and fonts as assets.
#[must_use]
pub fn asset_rule(extra: Value) -> Value {
    rule(
        [
            ("test", r"\.(png|jpe?g|gif|svg|woff|woff2|eot|ttf|otf)$"),
            ("type", "asset"),
        ],
        extra,
    )
}

/// `value` as a JSON string literal, the form compile-time defines expect.
pub(crate) fn quoted(value: &str) -> Value {
    Value::String(Value::String(value.to_owned()).to_string())
}

/// Strings as a JSON sequence.
pub(crate) fn strings(items: &[&str]) -> Vec<Value> {
    items.iter().map(|item| json!(item)).collect()
}

/// Prepend `head` to the sequence at `existing`, skipping duplicates.
pub(crate) fn prepend_unique(head: Vec<Value>, existing: Option<&Value>) -> Value {
    let mut out = head;
    for item in existing.and_then(Value::as_array).into_iter().flatten() {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    Value::Array(out)
}

/// Append `item` to the `plugins` sequence, creating it when absent.
///
/// # Errors
///
/// Returns [`ComposeError::MergeTypeMismatch`] when `plugins` already holds
/// something other than a sequence.
pub(crate) fn push_plugin(config: &mut Value, item: Value) -> ComposeResult<()> {
    let Some(map) = config.as_object_mut() else {
        return Ok(());
    };
    let slot = map
        .entry("plugins")
        .or_insert_with(|| Value::Array(Vec::new()));
    match slot {
        Value::Array(plugins) => {
            plugins.push(item);
            Ok(())
        }
        other => Err(Arc::new(ComposeError::mismatch(
            "plugins",
            Shape::of(other),
            Shape::Sequence,
        ))),
    }
}
