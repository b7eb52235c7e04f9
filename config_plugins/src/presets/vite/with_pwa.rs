//! Progressive Web App support through an injected PWA plugin factory.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::presets::capability::{SharedIntegration, instantiate_optional};
use crate::presets::common::push_plugin;
use crate::{Context, IntoPluginError, Plugin, PluginOutcome};

const PWA_PACKAGE: &str = "vite-plugin-pwa";
const INDEX_FALLBACK: &str = "/index.html";

/// When the service worker picks up a new version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegisterType {
    /// Activate new versions as soon as they are installed.
    #[default]
    AutoUpdate,
    /// Wait for the application to prompt the user.
    Prompt,
}

/// How the service worker is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Generate the whole service worker from the workbox options.
    #[default]
    #[serde(rename = "generateSW")]
    GenerateSw,
    /// Inject the precache manifest into a hand-written worker.
    #[serde(rename = "injectManifest")]
    InjectManifest,
}

/// Options for [`with_pwa`].
///
/// `manifest`, `workbox` and `dev_options` are passed through to the PWA
/// plugin; the last two are laid over the preset's own defaults key by key.
/// Keys in `extra` are copied onto the plugin options last.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithPwaOptions {
    /// Leave the configuration untouched.
    pub disabled: bool,
    /// Service worker update behaviour.
    pub register_type: Option<RegisterType>,
    /// Public base for the worker; defaults to `/`.
    pub base: Option<String>,
    /// Directory holding a custom worker.
    pub src_dir: Option<String>,
    /// Worker file name.
    pub file_name: Option<String>,
    /// Static assets to precache.
    pub include_assets: Option<Vec<String>>,
    /// Web app manifest.
    pub manifest: Map<String, Value>,
    /// Workbox options.
    pub workbox: Map<String, Value>,
    /// Options for the development service worker.
    pub dev_options: Map<String, Value>,
    /// Registration script injection; defaults to `"auto"`. Use `false` to
    /// disable injection.
    pub inject_register: Option<Value>,
    /// Worker generation strategy.
    pub strategies: Option<Strategy>,
    /// Additional plugin options.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plugin adding a PWA plugin to Vite. Created by [`with_pwa`].
#[derive(Clone, Debug)]
pub struct WithPwa {
    options: WithPwaOptions,
    integration: Option<SharedIntegration>,
}

/// Append a PWA plugin built by `integration` from `options`.
///
/// With `options.disabled` the configuration is returned unchanged.
///
/// ```rust
/// use config_plugins::presets::capability::DescriptorIntegration;
/// use config_plugins::presets::vite::{self, WithPwaOptions};
/// use config_plugins::{Context, Plugin};
/// use serde_json::json;
///
/// let plugin = vite::with_pwa(
///     WithPwaOptions::default(),
///     Some(DescriptorIntegration::shared("vite-plugin-pwa")),
/// );
/// let config = plugin.apply(json!({}), &Context::default())?;
/// assert_eq!(config["plugins"][0]["options"]["registerType"], "autoUpdate");
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[must_use]
pub const fn with_pwa(options: WithPwaOptions, integration: Option<SharedIntegration>) -> WithPwa {
    WithPwa {
        options,
        integration,
    }
}

impl WithPwa {
    fn plugin_options(&self, development: bool) -> Value {
        let opts = &self.options;
        let workbox = spread(
            json!({
                "globPatterns": ["**/*.{js,css,html,ico,png,svg}"],
                "globIgnores": ["**/*.json"],
                "runtimeCaching": [],
                "navigateFallback": INDEX_FALLBACK,
            }),
            &opts.workbox,
        );
        let dev_options = spread(
            json!({
                "enabled": development,
                "type": "module",
                "navigateFallback": INDEX_FALLBACK,
            }),
            &opts.dev_options,
        );
        let include_assets = opts.include_assets.clone().unwrap_or_else(|| {
            ["favicon.ico", "apple-touch-icon.png", "safari-pinned-tab.svg"]
                .map(str::to_owned)
                .to_vec()
        });

        let mut plugin = json!({
            "base": opts.base.as_deref().unwrap_or("/"),
            "registerType": opts.register_type.unwrap_or_default(),
            "includeAssets": include_assets,
            "strategies": opts.strategies.unwrap_or_default(),
            "manifest": opts.manifest,
            "workbox": workbox,
            "injectRegister": opts.inject_register.clone().unwrap_or_else(|| json!("auto")),
            "devOptions": dev_options,
        });
        if let Some(map) = plugin.as_object_mut() {
            if let Some(dir) = &opts.src_dir {
                map.insert("srcDir".to_owned(), json!(dir));
            }
            if let Some(file) = &opts.file_name {
                map.insert("filename".to_owned(), json!(file));
            }
        }
        spread(plugin, &opts.extra)
    }
}

/// Shallow object spread: keys in `extra` replace those in `base`.
fn spread(base: Value, extra: &Map<String, Value>) -> Value {
    match base {
        Value::Object(mut map) => {
            map.extend(extra.clone());
            Value::Object(map)
        }
        other => other,
    }
}

impl<X: AsRef<Context>> Plugin<Value, X> for WithPwa {
    fn apply(&self, mut config: Value, context: &X) -> PluginOutcome<Value> {
        if self.options.disabled {
            return Ok(config);
        }
        let development = context.as_ref().mode().is_development();
        let strategy = self.options.strategies.unwrap_or_default();
        tracing::debug!(?strategy, development, "PWA support enabled");

        let options = self.plugin_options(development);
        if let Some(plugin) = instantiate_optional(self.integration.as_ref(), PWA_PACKAGE, options)? {
            push_plugin(&mut config, plugin).into_plugin()?;
        }
        Ok(config)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("vite:with-pwa")
    }
}
