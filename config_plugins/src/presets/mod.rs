//! Ready-made plugins for common JavaScript bundlers.
//!
//! Each submodule binds the generic engine to one bundler's configuration
//! vocabulary over [`serde_json::Value`]. Presets build a layer of defaults
//! and merge it *beneath* the configuration they receive, so anything an
//! earlier plugin or the caller set survives. Keys whose computed value must
//! win, such as `mode` and `base`, are marked
//! [`crate::MergePolicy::PreferExisting`] on the defaults side.
//!
//! Presets are generic over any context type implementing
//! `AsRef<Context>`, so they work with [`crate::Context`] itself or with a
//! bundler context such as [`vite::ViteContext`].
//!
//! ```rust
//! use config_plugins::compose;
//! use config_plugins::presets::{rspack, WithBaseOptions};
//! use config_plugins::{Context, Mode};
//!
//! let chain = compose![rspack::with_base(WithBaseOptions::default())];
//! let ctx = rspack::RspackContext::new(Context::new().with_mode(Mode::Production));
//! let config = chain.run_empty(&ctx)?;
//! assert_eq!(config["output"]["filename"], "[name].[contenthash].js");
//! # Ok::<_, std::sync::Arc<config_plugins::ComposeError>>(())
//! ```

pub mod capability;
pub mod common;
mod options;
pub mod rsbuild;
pub mod rspack;
pub mod vite;

pub use options::{Entry, JsxRuntime, WithBaseOptions, WithEnvOptions, WithReactOptions};

use serde_json::Value;

use crate::merge::merge_with;
use crate::{ComposeResult, Context, MergeRules, Mode};

/// Layer `defaults` beneath `config`, letting `rules` protect computed keys.
pub(crate) fn beneath(defaults: &Value, config: &Value, rules: &MergeRules) -> ComposeResult<Value> {
    merge_with(defaults, [config], rules)
}

/// Mode from options first, then context, then the default.
pub(crate) fn option_mode(option: Option<Mode>, context: &Context) -> Mode {
    option.or_else(|| context.explicit_mode()).unwrap_or_default()
}
