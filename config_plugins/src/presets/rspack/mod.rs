//! Rspack bindings.
//!
//! Rspack reads a configuration object rather than a function, so
//! [`compose_plugins`] runs the chain once, from `{}`, under a default
//! [`RspackContext`].

use serde_json::{Value, json};

use crate::presets::common::{COMMON_EXTENSIONS, strings};
use crate::presets::options::hashed_name;
use crate::{ComposeResult, ComposedPlugin, Context};

mod with_base;
mod with_react;

pub use with_base::{WithBase, with_base};
pub use with_react::{WithReact, with_react};

/// Source map style, or none at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Devtool {
    /// Emit no source maps (`devtool: false`).
    Disabled,
    /// A named Rspack devtool such as `source-map`.
    Named(String),
}

impl Devtool {
    /// JSON form Rspack expects.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Disabled => Value::Bool(false),
            Self::Named(name) => json!(name),
        }
    }
}

/// Context handed to Rspack plugins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RspackContext {
    base: Context,
    target: Option<Vec<String>>,
    devtool: Option<Devtool>,
}

impl RspackContext {
    /// Wrap a base context.
    #[must_use]
    pub const fn new(base: Context) -> Self {
        Self {
            base,
            target: None,
            devtool: None,
        }
    }

    /// Compilation target(s) such as `web` or `node`.
    #[must_use]
    pub fn with_target<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    /// Force a devtool regardless of preset options.
    #[must_use]
    pub fn with_devtool(mut self, devtool: Devtool) -> Self {
        self.devtool = Some(devtool);
        self
    }

    /// Targets named by the caller, if any.
    #[must_use]
    pub fn target(&self) -> Option<&[String]> {
        self.target.as_deref()
    }

    /// Devtool forced by the caller, if any.
    #[must_use]
    pub const fn devtool(&self) -> Option<&Devtool> {
        self.devtool.as_ref()
    }
}

impl AsRef<Context> for RspackContext {
    fn as_ref(&self) -> &Context {
        &self.base
    }
}

impl AsRef<Self> for RspackContext {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Run `chain` once from `{}` with a default context.
///
/// # Errors
///
/// Returns the chain's error.
pub fn compose_plugins(chain: &ComposedPlugin<Value, RspackContext>) -> ComposeResult<Value> {
    chain.run_with_default_context(json!({}))
}

/// Minimal Rspack configuration for `context`, without running any plugin.
#[must_use]
pub fn create_base_config(context: &impl AsRef<Context>) -> Value {
    let ctx = context.as_ref();
    let mode = ctx.mode();
    json!({
        "mode": mode.as_str(),
        "output": {
            "path": ctx.output_path().as_str(),
            "clean": true,
            "filename": hashed_name(mode, "[name]", "js"),
            "publicPath": "/",
        },
        "resolve": { "extensions": strings(&COMMON_EXTENSIONS) },
        "module": { "rules": [] },
        "plugins": [],
        "optimization": { "runtimeChunk": false },
    })
}

/// One target as a string, several as a sequence.
pub(crate) fn target_value(targets: &[String]) -> Value {
    match targets {
        [single] => json!(single),
        many => json!(many),
    }
}

#[cfg(test)]
mod tests;
