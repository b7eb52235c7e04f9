//! Resolving plugins by name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::Composer;
use crate::{Context, Named, Plugin};

/// Named plugins that can be assembled into a chain by name.
///
/// Names that are not registered still occupy their position in the
/// resolved chain. They fail with a
/// [`crate::ComposeError::ContractViolation`] when reached, and
/// [`crate::ComposedPlugin::check`] reports them up front.
///
/// ```rust
/// use config_plugins::{from_fn, Context, PluginRegistry};
/// use serde_json::{json, Value};
///
/// let mut registry = PluginRegistry::<Value>::new();
/// registry.register("entry", from_fn(|mut c: Value, _: &Context| {
///     c["entry"] = json!("./src/index.ts");
///     c
/// }));
///
/// let chain = registry.resolve(["entry", "missing"]).build();
/// assert!(chain.check().is_err());
/// assert!(chain.run_empty(&Context::default()).is_err());
/// ```
pub struct PluginRegistry<C, X = Context> {
    plugins: BTreeMap<String, Arc<dyn Plugin<C, X> + Send + Sync>>,
}

impl<C, X> PluginRegistry<C, X> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            plugins: BTreeMap::new(),
        }
    }

    /// Store `plugin` under `name`, replacing any plugin registered before.
    ///
    /// The plugin reports `name` in diagnostics.
    pub fn register<P>(&mut self, name: impl Into<String>, plugin: P) -> &mut Self
    where
        P: Plugin<C, X> + Send + Sync + 'static,
    {
        let key: String = name.into();
        let named = Named::new(key.clone(), plugin);
        if self.plugins.insert(key.clone(), Arc::new(named)).is_some() {
            tracing::debug!(plugin = %key, "replaced registered plugin");
        }
        self
    }

    /// Builder form of [`PluginRegistry::register`].
    #[must_use]
    pub fn with<P>(mut self, name: impl Into<String>, plugin: P) -> Self
    where
        P: Plugin<C, X> + Send + Sync + 'static,
    {
        self.register(name, plugin);
        self
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Build a [`Composer`] from `names`, preserving their order.
    #[must_use]
    pub fn resolve<I, S>(&self, names: I) -> Composer<C, X>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut composer = Composer::new();
        for requested in names {
            let name = requested.as_ref();
            match self.plugins.get(name) {
                Some(plugin) => composer.push_shared(Arc::clone(plugin)),
                None => {
                    tracing::debug!(plugin = %name, "plugin name did not resolve");
                    composer.push_unresolved(name);
                }
            }
        }
        composer
    }
}

impl<C, X> Default for PluginRegistry<C, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, X> fmt::Debug for PluginRegistry<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.plugins.keys()).finish()
    }
}
