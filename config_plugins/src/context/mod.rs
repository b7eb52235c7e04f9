//! Read-only context shared by every plugin in a composition run.
//!
//! [`Context`] carries the small vocabulary every integration understands
//! (`mode`, `project_root`, `source_root`, `output_path`) plus an open
//! extension map for integration-specific fields. Plugins receive it by
//! shared reference, so nothing a plugin does can change what the next
//! plugin observes.

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ComposeResult, ComposeResultExt};

mod load;
mod mode;

pub use mode::Mode;

/// Output directory used when neither options nor context name one.
pub const DEFAULT_OUTPUT_PATH: &str = "dist";

/// Ambient parameters for one composition run.
///
/// # Examples
///
/// ```rust
/// use config_plugins::{Context, Mode};
///
/// let ctx = Context::new()
///     .with_mode(Mode::Production)
///     .with_output_path("build")
///     .with_extension("command", "build");
///
/// assert!(ctx.mode().is_production());
/// assert_eq!(ctx.output_path().as_str(), "build");
/// assert_eq!(ctx.extension("command"), Some(&serde_json::json!("build")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_root: Option<Utf8PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_root: Option<Utf8PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_path: Option<Utf8PathBuf>,
    #[serde(flatten)]
    extensions: Map<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the project root directory.
    #[must_use]
    pub fn with_project_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Sets the source root directory.
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// Sets the build output directory.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Adds an integration-specific field.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Execution mode, defaulting to [`Mode::Development`].
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }

    /// Execution mode only when the caller set one.
    #[must_use]
    pub const fn explicit_mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Build output directory, defaulting to [`DEFAULT_OUTPUT_PATH`].
    #[must_use]
    pub fn output_path(&self) -> &Utf8Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_OUTPUT_PATH))
    }

    /// Build output directory only when the caller set one.
    #[must_use]
    pub fn explicit_output_path(&self) -> Option<&Utf8Path> {
        self.output_path.as_deref()
    }

    /// Project root directory, if known.
    #[must_use]
    pub fn project_root(&self) -> Option<&Utf8Path> {
        self.project_root.as_deref()
    }

    /// Source root directory, if known.
    #[must_use]
    pub fn source_root(&self) -> Option<&Utf8Path> {
        self.source_root.as_deref()
    }

    /// Raw integration-specific field.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// All integration-specific fields.
    #[must_use]
    pub const fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    /// Deserialise an integration-specific field into `T`.
    ///
    /// Returns `Ok(None)` when the field is absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Serialization`] when the field exists
    /// but does not match `T`.
    pub fn extension_as<T: DeserializeOwned>(&self, key: &str) -> ComposeResult<Option<T>> {
        self.extensions
            .get(key)
            .cloned()
            .map(serde_json::from_value::<T>)
            .transpose()
            .into_compose()
    }
}

impl AsRef<Self> for Context {
    fn as_ref(&self) -> &Self {
        self
    }
}

#[cfg(test)]
mod tests;
