//! React support for Rspack: an SWC loader rule and fast refresh.

use std::borrow::Cow;

use serde_json::{Value, json};

use crate::merge::merge;
use crate::presets::WithReactOptions;
use crate::presets::capability::{SharedIntegration, instantiate_optional};
use crate::presets::common::{SCRIPT_EXTENSIONS, prepend_unique, push_plugin, strings, ts_js_rule};
use crate::{Context, IntoPluginError, Plugin, PluginOutcome};

const REFRESH_PACKAGE: &str = "@rspack/plugin-react-refresh";

/// Plugin adding React to an Rspack configuration. Created by
/// [`with_react`].
#[derive(Clone, Debug)]
pub struct WithReact {
    options: WithReactOptions,
    refresh: Option<SharedIntegration>,
}

/// Append an SWC rule for JSX and TSX and, in development, the refresh
/// plugin built by `refresh`.
///
/// ```rust
/// use config_plugins::presets::capability::DescriptorIntegration;
/// use config_plugins::presets::{rspack, WithReactOptions};
/// use config_plugins::{Context, Mode, Plugin};
/// use serde_json::json;
///
/// let plugin = rspack::with_react(
///     WithReactOptions::default(),
///     Some(DescriptorIntegration::shared("@rspack/plugin-react-refresh")),
/// );
/// let dev = Context::new().with_mode(Mode::Development);
/// let config = plugin.apply(json!({}), &dev)?;
/// assert_eq!(config["plugins"][0]["name"], "@rspack/plugin-react-refresh");
/// assert_eq!(config["module"]["rules"][0]["use"][0]["loader"], "builtin:swc-loader");
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[must_use]
pub const fn with_react(options: WithReactOptions, refresh: Option<SharedIntegration>) -> WithReact {
    WithReact { options, refresh }
}

impl WithReact {
    fn swc_rule(&self, development: bool) -> Value {
        let opts = &self.options;
        ts_js_rule(json!({
            "use": [{
                "loader": "builtin:swc-loader",
                "options": {
                    "jsc": {
                        "parser": { "syntax": "typescript", "tsx": true, "decorators": true },
                        "transform": {
                            "react": {
                                "runtime": opts.runtime.unwrap_or_default().as_str(),
                                "development": opts.development.unwrap_or(development),
                                "refresh": opts.refresh.unwrap_or(development),
                                "importSource": opts.import_source.as_deref().unwrap_or("react"),
                            },
                        },
                        "target": "es2015",
                    },
                },
            }],
        }))
    }
}

impl<X: AsRef<Context>> Plugin<Value, X> for WithReact {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let development = context.as_ref().mode().is_development();

        let mut rules = config
            .pointer("/module/rules")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        rules.push(self.swc_rule(development));
        let overlay = json!({
            "module": { "rules": rules },
            "resolve": {
                "extensions": prepend_unique(
                    strings(&SCRIPT_EXTENSIONS),
                    config.pointer("/resolve/extensions"),
                ),
            },
        });
        let mut merged = merge(&config, [&overlay]).into_plugin()?;

        if development
            && let Some(plugin) = instantiate_optional(self.refresh.as_ref(), REFRESH_PACKAGE, json!({}))?
        {
            push_plugin(&mut merged, plugin).into_plugin()?;
        }
        Ok(merged)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("rspack:with-react")
    }
}
