//! Injected factories for optional bundler plugins.
//!
//! Bundler plugins such as a React transform or a PWA generator are opaque
//! objects owned by the bundler's own ecosystem. Presets never construct
//! them directly. Instead a [`ToolIntegration`] is handed to the preset and
//! asked to produce a JSON descriptor from the preset's options. A preset
//! given no integration logs a warning and carries on without that plugin.

use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::PluginOutcome;

/// Factory for one kind of bundler plugin.
pub trait ToolIntegration: Send + Sync {
    /// Package or plugin name, used in diagnostics.
    fn name(&self) -> &str;

    /// Produce the plugin value for `options`.
    ///
    /// # Errors
    ///
    /// Returns an error when the options cannot be honoured. The preset
    /// propagates it, failing the chain.
    fn instantiate(&self, options: Value) -> PluginOutcome<Value>;
}

/// Shared handle to an integration.
pub type SharedIntegration = Arc<dyn ToolIntegration>;

/// Integration producing `{"name": ..., "options": ...}` descriptors.
///
/// Suitable when the configuration is handed to a tool that instantiates
/// plugins from descriptors, and for tests.
///
/// ```rust
/// use config_plugins::presets::capability::{DescriptorIntegration, ToolIntegration};
/// use serde_json::json;
///
/// let react = DescriptorIntegration::new("@vitejs/plugin-react");
/// let plugin = react.instantiate(json!({"jsxRuntime": "automatic"}))?;
/// assert_eq!(plugin, json!({
///     "name": "@vitejs/plugin-react",
///     "options": {"jsxRuntime": "automatic"},
/// }));
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptorIntegration {
    name: String,
}

impl DescriptorIntegration {
    /// Create an integration for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Convenience constructor returning a [`SharedIntegration`].
    #[must_use]
    pub fn shared(name: impl Into<String>) -> SharedIntegration {
        Arc::new(Self::new(name))
    }
}

impl ToolIntegration for DescriptorIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self, options: Value) -> PluginOutcome<Value> {
        Ok(json!({ "name": self.name, "options": options }))
    }
}

impl fmt::Debug for dyn ToolIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolIntegration")
            .field("name", &self.name())
            .finish()
    }
}

/// Instantiate `integration` if present, warning about `package` otherwise.
pub(crate) fn instantiate_optional(
    integration: Option<&SharedIntegration>,
    package: &str,
    options: Value,
) -> PluginOutcome<Option<Value>> {
    let Some(found) = integration else {
        tracing::warn!(
            integration = package,
            "optional integration is not installed; continuing without it"
        );
        return Ok(None);
    };
    tracing::debug!(integration = found.name(), "instantiating integration");
    found.instantiate(options).map(Some)
}
