//! Core Rsbuild defaults.

use std::borrow::Cow;

use serde_json::{Value, json};

use super::RsbuildContext;
use crate::presets::common::context_aliases;
use crate::presets::options::hashed_name;
use crate::presets::{Entry, WithBaseOptions, beneath};
use crate::{Context, IntoPluginError, MergeRules, Plugin, PluginOutcome};

const DEFAULT_ENTRY: &str = "./src/main.ts";

/// Plugin applying Rsbuild defaults. Created by [`with_base`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WithBase {
    options: WithBaseOptions,
}

/// Layer Rsbuild defaults beneath the incoming configuration.
///
/// Unlike the other presets, a mode or output path set on the context beats
/// the one in `options`. Bare entries become the `index` chunk.
///
/// ```rust
/// use config_plugins::presets::{rsbuild, WithBaseOptions};
/// use config_plugins::{Context, Mode, Plugin};
/// use serde_json::json;
///
/// let options = WithBaseOptions { mode: Some(Mode::Development), ..Default::default() };
/// let ctx = rsbuild::RsbuildContext::new(Context::new().with_mode(Mode::Production));
/// let config = rsbuild::with_base(options).apply(json!({}), &ctx)?;
///
/// assert_eq!(config["source"]["entry"], json!({"index": "./src/main.ts"}));
/// assert_eq!(config["output"]["filename"]["js"], "[name].[contenthash].js");
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[must_use]
pub const fn with_base(options: WithBaseOptions) -> WithBase {
    WithBase { options }
}

impl WithBase {
    fn defaults(&self, context: &RsbuildContext) -> Value {
        let opts = &self.options;
        let base: &Context = context.as_ref();
        let mode = base.explicit_mode().or(opts.mode).unwrap_or_default();
        let development = mode.is_development();
        let output_path = base
            .explicit_output_path()
            .or(opts.output_path.as_deref())
            .unwrap_or_else(|| base.output_path());
        let target = opts
            .target
            .as_ref()
            .and_then(|targets| targets.first().cloned())
            .unwrap_or_else(|| context.target().unwrap_or_default().as_str().to_owned());
        let entry = opts
            .entry
            .as_ref()
            .map_or_else(|| Entry::from(DEFAULT_ENTRY).to_named_value(), Entry::to_named_value);

        let mut defaults = json!({
            "source": { "entry": entry },
            "resolve": { "alias": context_aliases(base) },
            "output": {
                "target": target,
                "distPath": { "root": output_path.as_str() },
                "filename": {
                    "js": hashed_name(mode, "[name]", "js"),
                    "css": hashed_name(mode, "[name]", "css"),
                },
                "assetPrefix": opts.public_path.as_deref().unwrap_or("/"),
                "cleanDistPath": true,
            },
            "server": { "port": 3000, "host": "localhost" },
            "dev": { "hmr": development, "liveReload": development },
            "plugins": [],
        });
        if opts.source_map.unwrap_or(development)
            && let Some(map) = defaults.as_object_mut()
        {
            let devtool = if development { "eval-source-map" } else { "source-map" };
            map.insert("tools".to_owned(), json!({ "rspack": { "devtool": devtool } }));
        }
        defaults
    }
}

impl<X: AsRef<RsbuildContext>> Plugin<Value, X> for WithBase {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let defaults = self.defaults(context.as_ref());
        beneath(&defaults, &config, &MergeRules::new()).into_plugin()
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("rsbuild:with-base")
    }
}
