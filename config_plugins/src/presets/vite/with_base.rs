//! Core Vite defaults: build output, resolution, dev servers and CSS modules.

use std::borrow::Cow;

use serde_json::{Value, json};

use crate::presets::common::{COMMON_EXTENSIONS, context_aliases, quoted, strings};
use crate::presets::{WithBaseOptions, beneath, option_mode};
use crate::{Context, IntoPluginError, MergePolicy, MergeRules, Plugin, PluginOutcome};

const DEFAULT_TARGET: &str = "es2020";
const ENV_PREFIX: &str = "VITE_";

/// Plugin applying Vite defaults. Created by [`with_base`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WithBase {
    options: WithBaseOptions,
}

/// Layer Vite defaults beneath the incoming configuration.
///
/// `mode`, `base` and `envPrefix` are always taken from the resolved options;
/// every other key the configuration already sets is kept.
///
/// ```rust
/// use config_plugins::presets::{vite, WithBaseOptions};
/// use config_plugins::{Context, Mode, Plugin};
/// use serde_json::json;
///
/// let plugin = vite::with_base(WithBaseOptions::default());
/// let ctx = Context::new().with_mode(Mode::Production);
/// let config = plugin.apply(json!({"server": {"port": 8080}}), &ctx)?;
///
/// assert_eq!(config["mode"], "production");
/// assert_eq!(config["build"]["minify"], true);
/// assert_eq!(config["server"], json!({"port": 8080, "host": true}));
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[must_use]
pub const fn with_base(options: WithBaseOptions) -> WithBase {
    WithBase { options }
}

impl WithBase {
    fn defaults(&self, context: &Context) -> Value {
        let opts = &self.options;
        let mode = option_mode(opts.mode, context);
        let output_path = opts
            .output_path
            .as_deref()
            .unwrap_or_else(|| context.output_path());
        let targets = opts
            .target
            .clone()
            .filter(|targets| !targets.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_TARGET.to_owned()]);
        let primary_target = targets.first().map_or(DEFAULT_TARGET, String::as_str);
        json!({
            "mode": mode.as_str(),
            "base": opts.public_path.as_deref().unwrap_or("/"),
            "build": {
                "outDir": output_path.as_str(),
                "sourcemap": opts.source_map.unwrap_or_else(|| mode.is_development()),
                "minify": mode.is_production(),
                "target": targets,
                "rollupOptions": {},
            },
            "resolve": {
                "extensions": strings(&COMMON_EXTENSIONS),
                "alias": context_aliases(context),
            },
            "server": { "port": 3000, "host": true },
            "preview": { "port": 5000, "host": true },
            "css": {
                "modules": {
                    "localsConvention": "camelCaseOnly",
                    "generateScopedName": "[name]__[local]___[hash:base64:5]",
                },
            },
            "envPrefix": [ENV_PREFIX],
            "optimizeDeps": {},
            "esbuild": { "target": primary_target },
            "define": { "process.env.NODE_ENV": quoted(mode.as_str()) },
            "plugins": [],
        })
    }

    fn rules() -> MergeRules {
        MergeRules::new()
            .set("mode", MergePolicy::PreferExisting)
            .set("base", MergePolicy::PreferExisting)
            .set("envPrefix", MergePolicy::PreferExisting)
    }
}

impl<X: AsRef<Context>> Plugin<Value, X> for WithBase {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let defaults = self.defaults(context.as_ref());
        beneath(&defaults, &config, &Self::rules()).into_plugin()
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("vite:with-base")
    }
}
