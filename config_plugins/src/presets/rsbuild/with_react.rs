//! React support for Rsbuild through an injected `pluginReact` factory.

use std::borrow::Cow;

use serde_json::{Value, json};

use crate::merge::merge;
use crate::presets::WithReactOptions;
use crate::presets::capability::{SharedIntegration, instantiate_optional};
use crate::presets::common::{prepend_unique, push_plugin};
use crate::{Context, IntoPluginError, Plugin, PluginOutcome};

const REACT_PACKAGE: &str = "@rsbuild/plugin-react";
const SCRIPT_PATTERN: &str = r"\.(js|jsx|ts|tsx)$";

/// Plugin adding React to an Rsbuild configuration. Created by
/// [`with_react`].
#[derive(Clone, Debug)]
pub struct WithReact {
    options: WithReactOptions,
    integration: Option<SharedIntegration>,
}

/// Append the React plugin built by `integration` and include script
/// sources in compilation.
#[must_use]
pub const fn with_react(options: WithReactOptions, integration: Option<SharedIntegration>) -> WithReact {
    WithReact {
        options,
        integration,
    }
}

impl<X: AsRef<Context>> Plugin<Value, X> for WithReact {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let opts = &self.options;
        let is_dev = context.as_ref().mode().is_development();
        let development = opts.development.unwrap_or(is_dev);
        let refresh = opts.refresh.unwrap_or(is_dev) && development;
        let plugin_options = json!({
            "swcReactOptions": {
                "runtime": opts.runtime.unwrap_or_default().as_str(),
                "development": development,
                "refresh": refresh,
                "importSource": opts.import_source.as_deref().unwrap_or("react"),
            },
        });
        let react = instantiate_optional(self.integration.as_ref(), REACT_PACKAGE, plugin_options)?;

        let overlay = json!({
            "source": {
                "include": prepend_unique(vec![json!(SCRIPT_PATTERN)], config.pointer("/source/include")),
            },
        });
        let mut merged = merge(&config, [&overlay]).into_plugin()?;
        if let Some(plugin) = react {
            push_plugin(&mut merged, plugin).into_plugin()?;
        }
        Ok(merged)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("rsbuild:with-react")
    }
}
