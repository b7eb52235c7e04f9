//! Closure adapters and naming wrappers for plugins.

use std::borrow::Cow;
use std::fmt;

use super::{Plugin, PluginOutcome};

/// Plugin built from an infallible closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FnPlugin<F> {
    f: F,
}

/// Plugin built from a fallible closure. Created by [`try_from_fn`].
#[derive(Clone)]
pub struct TryFnPlugin<F> {
    f: F,
}

/// Wrap an infallible closure as a plugin.
///
/// ```rust
/// use config_plugins::{from_fn, Context, Plugin};
/// use serde_json::{json, Value};
///
/// let plugin = from_fn(|mut config: Value, ctx: &Context| {
///     config["mode"] = json!(ctx.mode().as_str());
///     config
/// });
/// let out = plugin.apply(json!({}), &Context::default())?;
/// assert_eq!(out, json!({"mode": "development"}));
/// # Ok::<_, config_plugins::PluginError>(())
/// ```
#[must_use]
pub const fn from_fn<C, X, F>(f: F) -> FnPlugin<F>
where
    F: Fn(C, &X) -> C,
{
    FnPlugin { f }
}

/// Wrap a fallible closure as a plugin.
///
/// ```rust
/// use config_plugins::{try_from_fn, Context, Plugin};
/// use serde_json::{json, Value};
///
/// let plugin = try_from_fn(|config: Value, _ctx: &Context| {
///     if config.get("entry").is_none() {
///         return Err("an entry point is required".into());
///     }
///     Ok(config)
/// });
/// assert!(plugin.apply(json!({}), &Context::default()).is_err());
/// ```
#[must_use]
pub const fn try_from_fn<C, X, F>(f: F) -> TryFnPlugin<F>
where
    F: Fn(C, &X) -> PluginOutcome<C>,
{
    TryFnPlugin { f }
}

impl<C, X, F> Plugin<C, X> for FnPlugin<F>
where
    F: Fn(C, &X) -> C,
{
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        Ok((self.f)(config, context))
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("anonymous")
    }
}

impl<C, X, F> Plugin<C, X> for TryFnPlugin<F>
where
    F: Fn(C, &X) -> PluginOutcome<C>,
{
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        (self.f)(config, context)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("anonymous")
    }
}

impl<F> fmt::Debug for FnPlugin<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPlugin").finish_non_exhaustive()
    }
}

impl<F> fmt::Debug for TryFnPlugin<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnPlugin").finish_non_exhaustive()
    }
}

/// A plugin carrying an explicit diagnostic name.
#[derive(Clone, Debug)]
pub struct Named<P> {
    name: Cow<'static, str>,
    inner: P,
}

impl<P> Named<P> {
    /// Attach `name` to `inner`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, inner: P) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Returns the wrapped plugin.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<C, X, P> Plugin<C, X> for Named<P>
where
    P: Plugin<C, X>,
{
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        self.inner.apply(config, context)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
