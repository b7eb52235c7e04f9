//! Gathering a [`Context`] from Figment providers.
//!
//! Loading happens once, before composition starts, so the composition
//! itself stays free of I/O. Environment variables are read through
//! [`figment::providers::Env`] using a caller-chosen prefix.

use figment::Figment;
use figment::providers::{Env, Serialized};

use super::Context;
use crate::{ComposeError, ComposeResult};
use std::sync::Arc;

impl Context {
    /// Build a [`Figment`] layering prefixed environment variables over
    /// `self`.
    ///
    /// `APP_MODE=production` with prefix `APP_` sets `mode`;
    /// unrecognised variables such as `APP_COMMAND` become extensions.
    #[must_use]
    pub fn figment(&self, prefix: &str) -> Figment {
        Figment::from(Serialized::defaults(self)).merge(Env::prefixed(prefix))
    }

    /// Extract a context from an arbitrary [`Figment`].
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Gathering`] when extraction fails, for example
    /// because `mode` holds an unknown value.
    pub fn from_figment(figment: &Figment) -> ComposeResult<Self> {
        figment
            .extract()
            .map_err(|err| Arc::new(ComposeError::gathering(err)))
    }

    /// Load a context from environment variables carrying `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Gathering`] when the environment holds values
    /// that do not fit the context, such as `APP_MODE=fast`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config_plugins::{Context, Mode};
    ///
    /// figment::Jail::expect_with(|jail| {
    ///     jail.set_env("WEB_MODE", "production");
    ///     jail.set_env("WEB_OUTPUT_PATH", "public");
    ///     let ctx = Context::load("WEB_").expect("context loads");
    ///     assert_eq!(ctx.mode(), Mode::Production);
    ///     assert_eq!(ctx.output_path().as_str(), "public");
    ///     Ok(())
    /// });
    /// ```
    pub fn load(prefix: &str) -> ComposeResult<Self> {
        Self::from_figment(&Self::default().figment(prefix))
    }
}
