//! The plugin contract shared by every composable configuration unit.
//!
//! A plugin is any value implementing [`Plugin`]: it receives the
//! configuration built so far together with a read-only context and returns
//! the next configuration. Plugins take `&self`, so they cannot carry state
//! from one invocation to the next; anything they need comes from their own
//! captured options or from the context.

use std::borrow::Cow;
use std::sync::Arc;

use crate::Context;

mod adapters;

pub use adapters::{FnPlugin, Named, TryFnPlugin, from_fn, try_from_fn};

/// Error type returned by plugins that fail on their own terms.
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by [`Plugin::apply`].
pub type PluginOutcome<C> = Result<C, PluginError>;

/// A pure transformation from one configuration value to the next.
///
/// `C` is the configuration type and `X` the context type. The context is
/// shared by reference with every plugin in a run and must not be relied
/// upon to carry state between plugins.
///
/// ```rust
/// use config_plugins::{Context, Plugin, PluginOutcome};
/// use serde_json::{json, Value};
///
/// struct DevServer {
///     port: u16,
/// }
///
/// impl Plugin<Value> for DevServer {
///     fn apply(&self, mut config: Value, _ctx: &Context) -> PluginOutcome<Value> {
///         if let Some(map) = config.as_object_mut() {
///             map.insert("server".into(), json!({"port": self.port}));
///         }
///         Ok(config)
///     }
///
///     fn name(&self) -> std::borrow::Cow<'_, str> {
///         "dev-server".into()
///     }
/// }
///
/// let out = DevServer { port: 3000 }.apply(json!({}), &Context::default())?;
/// assert_eq!(out["server"]["port"], 3000);
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
pub trait Plugin<C, X = Context> {
    /// Produce the next configuration from `config` and `context`.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] when the plugin cannot produce a
    /// configuration. The composer treats this as fatal for the whole chain.
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C>;

    /// Diagnostic name reported when this plugin breaks the chain.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Convenience combinators available on every plugin.
pub trait PluginExt<C, X>: Plugin<C, X> + Sized {
    /// Attach a diagnostic name to this plugin.
    ///
    /// ```rust
    /// use config_plugins::{from_fn, Context, Plugin, PluginExt};
    /// use serde_json::Value;
    ///
    /// let plugin = from_fn(|config: Value, _ctx: &Context| config).named("noop");
    /// assert_eq!(Plugin::<Value>::name(&plugin), "noop");
    /// ```
    fn named(self, name: impl Into<Cow<'static, str>>) -> Named<Self> {
        Named::new(name, self)
    }
}

impl<C, X, P> PluginExt<C, X> for P where P: Plugin<C, X> {}

impl<C, X, P> Plugin<C, X> for Arc<P>
where
    P: Plugin<C, X> + ?Sized,
{
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        (**self).apply(config, context)
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<C, X, P> Plugin<C, X> for Box<P>
where
    P: Plugin<C, X> + ?Sized,
{
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        (**self).apply(config, context)
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}
