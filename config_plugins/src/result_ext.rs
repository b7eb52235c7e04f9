//! Extensions for mapping errors to `ComposeResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ComposeError::…))`
//! patterns when converting external error types into the crate's
//! `ComposeResult<T>` alias (`Result<T, Arc<ComposeError>>`), and back into
//! the boxed error type plugins return.
//!
//! # Examples
//!
//! ```
//! use config_plugins::{ComposeResult, ComposeResultExt};
//!
//! fn encode() -> ComposeResult<serde_json::Value> {
//!     // serde_json::Error implements Into<ComposeError>
//!     serde_json::to_value(["dist"]).into_compose()
//! }
//! # assert!(encode().is_ok());
//! ```

use std::sync::Arc;

use crate::{ComposeError, ComposeResult, PluginError, PluginOutcome};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ComposeError>` into a `ComposeResult<T>`.
pub trait ComposeResultExt<T, E> {
    /// Convert `Result<T, E>` into `ComposeResult<T>` using
    /// `Into<ComposeError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<ComposeError>`.
    fn into_compose(self) -> ComposeResult<T>;
}

impl<T, E> ComposeResultExt<T, E> for Result<T, E>
where
    E: Into<ComposeError>,
{
    fn into_compose(self) -> ComposeResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Convert a `ComposeResult<T>` into the boxed error plugins report.
///
/// Plugins that call [`crate::merge::merge`] use this to surface a merge
/// failure as their own error with `?`.
pub trait IntoPluginError<T> {
    /// Box the shared [`ComposeError`] as a [`PluginError`].
    ///
    /// # Errors
    ///
    /// Returns the original error, boxed, when the input is `Err`.
    fn into_plugin(self) -> PluginOutcome<T>;
}

impl<T> IntoPluginError<T> for ComposeResult<T> {
    fn into_plugin(self) -> PluginOutcome<T> {
        self.map_err(|err| -> PluginError { Box::new(err) })
    }
}
