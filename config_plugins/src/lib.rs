//! Core crate for the `config_plugins` composition engine.
//!
//! A *plugin* maps a configuration value and a shared, read-only context to
//! a new configuration value. [`Composer`] folds an ordered list of plugins
//! into a single [`ComposedPlugin`] that threads the configuration through
//! each plugin in turn, failing fast on the first contract violation. The
//! [`merge`] module provides the deep merge that plugins use to layer their
//! defaults beneath configuration supplied by earlier plugins.
//!
//! ```rust
//! use config_plugins::{compose, from_fn, merge, Context, Mode};
//! use serde_json::{json, Value};
//!
//! let base = from_fn(|config: Value, _ctx: &Context| {
//!     merge::merge(&json!({"output": {"path": "dist"}}), [&config])
//!         .unwrap_or(config)
//! });
//! let release = from_fn(|config: Value, ctx: &Context| {
//!     let minify = json!({"minify": ctx.mode().is_production()});
//!     merge::merge(&config, [&minify]).unwrap_or(config)
//! });
//!
//! let plugin = compose![base, release];
//! let context = Context::new().with_mode(Mode::Production);
//! let config = plugin.run_empty(&context)?;
//! assert_eq!(config, json!({"output": {"path": "dist"}, "minify": true}));
//! # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
//! ```

extern crate self as config_plugins;

pub use config_plugins_macros::ConfigSchema;

pub mod compose;
pub mod context;
mod error;
pub mod merge;
pub mod plugin;
#[cfg(feature = "presets")]
pub mod presets;
mod result_ext;
mod shape;

pub use compose::{ComposedPlugin, Composer, PluginRegistry, compose};
pub use context::{Context, Mode};
pub use error::{AggregatedErrors, ComposeError, Violation};
pub use merge::{ConfigSchema, Merge, MergePolicy, MergeRules};
pub use plugin::{
    FnPlugin, Named, Plugin, PluginError, PluginExt, PluginOutcome, TryFnPlugin, from_fn,
    try_from_fn,
};
pub use result_ext::{ComposeResultExt, IntoPluginError};
pub use shape::{Shape, Structural};

use std::sync::Arc;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

/// Result type alias using a shared [`ComposeError`].
pub type ComposeResult<T> = Result<T, Arc<ComposeError>>;

/// Build a [`ComposedPlugin`] from a comma-separated list of plugins.
///
/// Each argument may be any value implementing [`Plugin`]; plugins run in
/// the order written. An empty invocation yields the identity plugin.
///
/// ```rust
/// use config_plugins::{compose, Context};
/// use serde_json::{json, Value};
///
/// let identity = compose![];
/// let config = json!({"entry": "./src/main.ts"});
/// let out: Value = identity.run(config.clone(), &Context::default())?;
/// assert_eq!(out, config);
/// # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        $crate::Composer::new().build()
    };
    ($($plugin:expr),+ $(,)?) => {
        $crate::Composer::new()$(.with($plugin))+.build()
    };
}
