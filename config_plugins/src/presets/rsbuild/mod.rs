//! Rsbuild bindings.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ComposeResult, ComposedPlugin, Context};

mod with_base;
mod with_react;

pub use with_base::{WithBase, with_base};
pub use with_react::{WithReact, with_react};

/// Environment Rsbuild compiles for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsbuildTarget {
    /// Browsers.
    #[default]
    Web,
    /// Node.js.
    Node,
    /// Web workers.
    WebWorker,
}

impl RsbuildTarget {
    /// Name as Rsbuild spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Node => "node",
            Self::WebWorker => "web-worker",
        }
    }
}

impl fmt::Display for RsbuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context handed to Rsbuild plugins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RsbuildContext {
    base: Context,
    target: Option<RsbuildTarget>,
    environment: Option<String>,
    cwd: Option<Utf8PathBuf>,
}

impl RsbuildContext {
    /// Wrap a base context.
    #[must_use]
    pub const fn new(base: Context) -> Self {
        Self {
            base,
            target: None,
            environment: None,
            cwd: None,
        }
    }

    /// Compile for `target`.
    #[must_use]
    pub const fn with_target(mut self, target: RsbuildTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Name the Rsbuild environment being configured.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Directory Rsbuild was started from.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<Utf8PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Target named by the caller, if any.
    #[must_use]
    pub const fn target(&self) -> Option<RsbuildTarget> {
        self.target
    }

    /// Environment name, if any.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Working directory, falling back to the project root.
    #[must_use]
    pub fn cwd(&self) -> Option<&Utf8Path> {
        self.cwd.as_deref().or_else(|| self.base.project_root())
    }
}

impl AsRef<Context> for RsbuildContext {
    fn as_ref(&self) -> &Context {
        &self.base
    }
}

impl AsRef<Self> for RsbuildContext {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Run `chain` once from `{}` with a default context.
///
/// # Errors
///
/// Returns the chain's error.
pub fn compose_plugins(chain: &ComposedPlugin<Value, RsbuildContext>) -> ComposeResult<Value> {
    chain.run_with_default_context(json!({}))
}

/// Minimal Rsbuild configuration for `context`, without running any plugin.
#[must_use]
pub fn create_base_config(context: &impl AsRef<Context>) -> Value {
    let ctx = context.as_ref();
    let development = ctx.mode().is_development();
    json!({
        "source": { "entry": { "index": "./src/main.ts" } },
        "output": {
            "target": RsbuildTarget::Web.as_str(),
            "distPath": { "root": ctx.output_path().as_str() },
            "cleanDistPath": true,
            "assetPrefix": "/",
        },
        "server": { "port": 3000 },
        "dev": { "hmr": development, "liveReload": development },
        "plugins": [],
    })
}
