//! Builder that accumulates plugins in declaration order.

use std::fmt;
use std::sync::Arc;

use super::ComposedPlugin;
use super::step::Step;
use crate::{Context, Plugin};

/// Ordered collection of plugins awaiting composition.
///
/// ```rust
/// use config_plugins::{from_fn, Composer, Context, PluginExt};
/// use serde_json::{json, Value};
///
/// let plugin = Composer::new()
///     .with(from_fn(|mut c: Value, _: &Context| { c["a"] = json!(1); c }).named("a"))
///     .with(from_fn(|mut c: Value, _: &Context| { c["b"] = json!(2); c }).named("b"))
///     .build();
///
/// assert_eq!(plugin.plugin_names().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(plugin.run_empty(&Context::default())?, json!({"a": 1, "b": 2}));
/// # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
/// ```
pub struct Composer<C, X = Context> {
    steps: Vec<Step<C, X>>,
}

impl<C, X> Composer<C, X> {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Create a composer with room for `capacity` plugins.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Append a plugin to the chain.
    pub fn push<P>(&mut self, plugin: P)
    where
        P: Plugin<C, X> + Send + Sync + 'static,
    {
        self.steps.push(Step::Plugin(Arc::new(plugin)));
    }

    /// Append an already shared plugin without wrapping it again.
    pub fn push_shared(&mut self, plugin: Arc<dyn Plugin<C, X> + Send + Sync>) {
        self.steps.push(Step::Plugin(plugin));
    }

    /// Append a plugin, returning the composer for chaining.
    #[must_use]
    pub fn with<P>(mut self, plugin: P) -> Self
    where
        P: Plugin<C, X> + Send + Sync + 'static,
    {
        self.push(plugin);
        self
    }

    pub(crate) fn push_unresolved(&mut self, name: impl Into<String>) {
        self.steps.push(Step::Unresolved { name: name.into() });
    }

    /// Number of steps collected so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` when no plugins have been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Freeze the chain into a runnable [`ComposedPlugin`].
    #[must_use]
    pub fn build(self) -> ComposedPlugin<C, X> {
        ComposedPlugin::from_steps(self.steps)
    }
}

impl<C, X> Default for Composer<C, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, X, P> Extend<P> for Composer<C, X>
where
    P: Plugin<C, X> + Send + Sync + 'static,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, plugins: I) {
        for plugin in plugins {
            self.push(plugin);
        }
    }
}

impl<C, X, P> FromIterator<P> for Composer<C, X>
where
    P: Plugin<C, X> + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = P>>(plugins: I) -> Self {
        let mut composer = Self::new();
        composer.extend(plugins);
        composer
    }
}

impl<C, X> fmt::Debug for Composer<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer").field("steps", &self.steps).finish()
    }
}

/// Compose `plugins`, in iteration order, into a single plugin.
///
/// Plugins of different types can be mixed by boxing or sharing them as
/// trait objects:
///
/// ```rust
/// use std::sync::Arc;
/// use config_plugins::{compose, from_fn, Context, Plugin};
/// use serde_json::{json, Value};
///
/// type Shared = Arc<dyn Plugin<Value> + Send + Sync>;
///
/// let plugins: Vec<Shared> = vec![
///     Arc::new(from_fn(|mut c: Value, _: &Context| { c["entry"] = json!("./src"); c })),
///     Arc::new(from_fn(|mut c: Value, _: &Context| { c["target"] = json!("web"); c })),
/// ];
/// let config = compose(plugins).run(json!({}), &Context::default())?;
/// assert_eq!(config, json!({"entry": "./src", "target": "web"}));
/// # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
/// ```
#[must_use]
pub fn compose<C, X, I, P>(plugins: I) -> ComposedPlugin<C, X>
where
    I: IntoIterator<Item = P>,
    P: Plugin<C, X> + Send + Sync + 'static,
{
    plugins.into_iter().collect::<Composer<C, X>>().build()
}
