//! React support: the JSX transform plugin, pre-bundling and a vendor chunk.

use std::borrow::Cow;

use serde_json::{Value, json};

use crate::merge::merge_with;
use crate::presets::capability::{SharedIntegration, instantiate_optional};
use crate::presets::common::{COMMON_EXTENSIONS, prepend_unique, push_plugin, quoted, strings};
use crate::presets::{WithReactOptions, beneath};
use crate::{Context, IntoPluginError, MergePolicy, MergeRules, Plugin, PluginOutcome};

const PRIMARY_PACKAGE: &str = "@vitejs/plugin-react";
const FALLBACK_PACKAGE: &str = "@vitejs/plugin-react-swc";
const PREBUNDLED: [&str; 4] = ["react", "react-dom", "react/jsx-runtime", "react-dom/client"];

/// React plugin factories, tried in order.
#[derive(Clone, Debug, Default)]
pub struct ReactIntegrations {
    /// Babel-based plugin, used whenever present.
    pub primary: Option<SharedIntegration>,
    /// SWC-based plugin, used only when `primary` is absent.
    pub fallback: Option<SharedIntegration>,
}

impl ReactIntegrations {
    /// Use `primary` with no fallback.
    #[must_use]
    pub fn primary(primary: SharedIntegration) -> Self {
        Self {
            primary: Some(primary),
            fallback: None,
        }
    }

    /// Use only the SWC-based `fallback`.
    #[must_use]
    pub fn fallback(fallback: SharedIntegration) -> Self {
        Self {
            primary: None,
            fallback: Some(fallback),
        }
    }
}

/// Plugin adding React to a Vite configuration. Created by [`with_react`].
#[derive(Clone, Debug)]
pub struct WithReact {
    options: WithReactOptions,
    integrations: ReactIntegrations,
}

/// Add the React plugin and React-specific optimisations.
///
/// The plugin from `integrations.primary` is appended to `plugins`. Without
/// one the fallback is tried, and without either a warning is logged and
/// the rest of the configuration is still applied.
#[must_use]
pub const fn with_react(options: WithReactOptions, integrations: ReactIntegrations) -> WithReact {
    WithReact {
        options,
        integrations,
    }
}

impl WithReact {
    fn react_plugin(&self, development: bool) -> PluginOutcome<Option<Value>> {
        let import_source = self.options.import_source.as_deref().unwrap_or("react");
        self.integrations.primary.as_ref().map_or_else(
            || {
                tracing::warn!(
                    integration = PRIMARY_PACKAGE,
                    fallback = FALLBACK_PACKAGE,
                    "React integration is not installed; trying the fallback"
                );
                let mut options = json!({ "jsxImportSource": import_source });
                if development && let Some(map) = options.as_object_mut() {
                    map.insert("plugins".to_owned(), json!([]));
                }
                instantiate_optional(self.integrations.fallback.as_ref(), FALLBACK_PACKAGE, options)
            },
            |primary| {
                let runtime = self.options.runtime.unwrap_or_default();
                primary
                    .instantiate(json!({
                        "jsxRuntime": runtime.as_str(),
                        "jsxImportSource": import_source,
                    }))
                    .map(Some)
            },
        )
    }
}

impl<X: AsRef<Context>> Plugin<Value, X> for WithReact {
    fn apply(&self, config: Value, context: &X) -> PluginOutcome<Value> {
        let mode = context.as_ref().mode();
        let development = self
            .options
            .development
            .unwrap_or_else(|| mode.is_development());
        let react = self.react_plugin(development)?;

        let defaults = json!({
            "optimizeDeps": { "exclude": [] },
            "define": {
                "__DEV__": development.to_string(),
                "process.env.NODE_ENV": quoted(mode.as_str()),
            },
        });
        let layered = beneath(&defaults, &config, &MergeRules::new()).into_plugin()?;

        let overlay = json!({
            "resolve": {
                "extensions": prepend_unique(
                    strings(&COMMON_EXTENSIONS),
                    config.pointer("/resolve/extensions"),
                ),
            },
            "optimizeDeps": {
                "include": prepend_unique(strings(&PREBUNDLED), config.pointer("/optimizeDeps/include")),
            },
            "build": {
                "rollupOptions": {
                    "output": { "manualChunks": { "react-vendor": ["react", "react-dom"] } },
                },
            },
        });
        let rules = MergeRules::new().set(
            "build.rollupOptions.output.manualChunks",
            MergePolicy::PreferIncoming,
        );
        let mut merged = merge_with(&layered, [&overlay], &rules).into_plugin()?;
        if let Some(plugin) = react {
            push_plugin(&mut merged, plugin).into_plugin()?;
        }
        Ok(merged)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("vite:with-react")
    }
}
