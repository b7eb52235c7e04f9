//! Core Rspack defaults: entry, output naming, chunk splitting and loaders.

use std::borrow::Cow;

use serde_json::{Value, json};

use super::{RspackContext, target_value};
use crate::presets::common::{COMMON_EXTENSIONS, asset_rule, strings};
use crate::presets::options::hashed_name;
use crate::presets::{WithBaseOptions, beneath, option_mode};
use crate::{Context, IntoPluginError, MergePolicy, MergeRules, Mode, Plugin, PluginOutcome};

const DEFAULT_ENTRY: &str = "./src/main.ts";
const DEFAULT_TARGET: &str = "web";
const BROWSER_TARGETS: [&str; 4] = ["last 2 versions", "> 0.2%", "not dead", "Firefox ESR"];

/// Plugin applying Rspack defaults. Created by [`with_base`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WithBase {
    options: WithBaseOptions,
}

/// Layer Rspack defaults beneath the incoming configuration.
///
/// `mode` and `devtool` always reflect the resolved options; a devtool set
/// on an [`RspackContext`] beats both. Default module rules are only used
/// when the configuration has none of its own.
#[must_use]
pub const fn with_base(options: WithBaseOptions) -> WithBase {
    WithBase { options }
}

impl WithBase {
    fn defaults(&self, context: &Context, target: Option<&[String]>) -> Value {
        let opts = &self.options;
        let mode = option_mode(opts.mode, context);
        let development = mode.is_development();
        let output_path = opts
            .output_path
            .as_deref()
            .unwrap_or_else(|| context.output_path());
        let target = opts
            .target
            .as_deref()
            .or(target)
            .map_or_else(|| json!(DEFAULT_TARGET), target_value);
        json!({
            "mode": mode.as_str(),
            "entry": opts.entry.as_ref().map_or_else(|| json!(DEFAULT_ENTRY), |entry| entry.to_value()),
            "target": target,
            "output": {
                "path": output_path.as_str(),
                "filename": hashed_name(mode, "[name]", "js"),
                "chunkFilename": hashed_name(mode, "[name]", "chunk.js"),
                "publicPath": opts.public_path.as_deref().unwrap_or("/"),
                "clean": true,
            },
            "resolve": { "extensions": strings(&COMMON_EXTENSIONS) },
            "experiments": { "css": true },
            "devtool": self.devtool(mode),
            "optimization": {
                "runtimeChunk": false,
                "splitChunks": {
                    "chunks": "all",
                    "cacheGroups": {
                        "vendor": {
                            "test": r"[\\/]node_modules[\\/]",
                            "name": "vendors",
                            "chunks": "all",
                        },
                    },
                },
            },
            "module": { "rules": default_rules(development) },
            "plugins": [],
        })
    }

    fn devtool(&self, mode: Mode) -> Value {
        if !self.options.source_map.unwrap_or_else(|| mode.is_development()) {
            return Value::Bool(false);
        }
        if mode.is_development() {
            json!("eval-source-map")
        } else {
            json!("source-map")
        }
    }

    fn rules() -> MergeRules {
        MergeRules::new()
            .set("mode", MergePolicy::PreferExisting)
            .set("devtool", MergePolicy::PreferExisting)
    }
}

fn default_rules(development: bool) -> Value {
    json!([
        asset_rule(json!({ "test": r"\.svg$" })),
        {
            "test": r"\.(jsx?|tsx?)$",
            "use": [{
                "loader": "builtin:swc-loader",
                "options": {
                    "jsc": {
                        "parser": { "syntax": "typescript", "tsx": true },
                        "transform": {
                            "react": {
                                "runtime": "automatic",
                                "development": development,
                                "refresh": development,
                            },
                        },
                    },
                    "env": { "targets": BROWSER_TARGETS },
                },
            }],
        },
    ])
}

impl<X: AsRef<RspackContext>> Plugin<Value, X> for WithBase {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let rspack: &RspackContext = context.as_ref();
        let mut defaults = self.defaults(rspack.as_ref(), rspack.target());
        if let (Some(devtool), Some(map)) = (rspack.devtool(), defaults.as_object_mut()) {
            map.insert("devtool".to_owned(), devtool.to_value());
        }
        beneath(&defaults, &config, &Self::rules()).into_plugin()
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("rspack:with-base")
    }
}
