//! Entry points producing what a `vite.config` module exports.

use std::sync::Arc;

use serde_json::{Value, json};

use super::{ConfigEnv, ViteContext};
use crate::presets::common::{COMMON_EXTENSIONS, strings};
use crate::{ComposeResult, ComposedPlugin, Context};

/// Configuration function handed to Vite.
///
/// ```rust
/// use config_plugins::presets::vite::{self, ConfigEnv, ViteContext};
/// use config_plugins::{compose, from_fn};
/// use serde_json::{json, Value};
///
/// let stamp = from_fn(|mut config: Value, ctx: &ViteContext| {
///     config["command"] = json!(ctx.command().map(|c| c.as_str()));
///     config
/// });
/// let config_fn = vite::compose_plugins(compose![stamp]);
/// let config = config_fn.call(&ConfigEnv::new("build", "production"))?;
/// assert_eq!(config, json!({"command": "build"}));
/// # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ViteConfigFn {
    chain: ComposedPlugin<Value, ViteContext>,
}

impl ViteConfigFn {
    /// Resolve `env` into a [`ViteContext`] and run the chain from `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Validation`] for an unknown mode or
    /// command, or the chain's own error.
    pub fn call(&self, env: &ConfigEnv) -> ComposeResult<Value> {
        let context = ViteContext::try_from(env).map_err(Arc::new)?;
        tracing::debug!(command = %env.command, mode = %env.mode, "resolving Vite configuration");
        self.chain.run(json!({}), &context)
    }

    /// The underlying chain.
    #[must_use]
    pub const fn chain(&self) -> &ComposedPlugin<Value, ViteContext> {
        &self.chain
    }
}

/// Wrap a composed chain as a Vite configuration function.
#[must_use]
pub const fn compose_plugins(chain: ComposedPlugin<Value, ViteContext>) -> ViteConfigFn {
    ViteConfigFn { chain }
}

/// Minimal Vite configuration for `context`, without running any plugin.
#[must_use]
pub fn create_base_config(context: &impl AsRef<Context>) -> Value {
    let ctx = context.as_ref();
    let mode = ctx.mode();
    json!({
        "mode": mode.as_str(),
        "base": "/",
        "build": {
            "outDir": ctx.output_path().as_str(),
            "sourcemap": mode.is_development(),
            "minify": mode.is_production(),
            "target": "es2015",
        },
        "resolve": { "extensions": strings(&COMMON_EXTENSIONS) },
        "plugins": [],
        "server": { "port": 3000 },
    })
}
