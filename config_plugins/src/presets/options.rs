//! Option types shared by every bundler preset.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::Mode;

/// Application entry point(s).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// A single module path.
    Single(String),
    /// Several modules bundled into one chunk.
    Many(Vec<String>),
    /// Named chunks, each with one or more modules.
    Named(BTreeMap<String, Value>),
}

impl Entry {
    /// JSON form understood by bundlers that accept entries as written.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(path) => json!(path),
            Self::Many(paths) => json!(paths),
            Self::Named(chunks) => json!(chunks),
        }
    }

    /// JSON form for bundlers that require named chunks; bare entries
    /// become the `index` chunk.
    #[must_use]
    pub fn to_named_value(&self) -> Value {
        match self {
            Self::Single(path) => json!({ "index": path }),
            Self::Many(paths) => json!({ "index": paths }),
            Self::Named(chunks) => json!(chunks),
        }
    }

    /// Returns `true` when the entry names no modules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(path) => path.is_empty(),
            Self::Many(paths) => paths.is_empty(),
            Self::Named(chunks) => chunks.is_empty(),
        }
    }
}

impl From<&str> for Entry {
    fn from(path: &str) -> Self {
        Self::Single(path.to_owned())
    }
}

/// JSX transform flavour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsxRuntime {
    /// The automatic runtime introduced in React 17.
    #[default]
    Automatic,
    /// `React.createElement` calls.
    Classic,
}

impl JsxRuntime {
    /// Lowercase name as bundlers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Classic => "classic",
        }
    }
}

/// Options for every `with_base` preset.
///
/// Unset fields fall back to the context and then to the preset default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithBaseOptions {
    /// Build mode.
    pub mode: Option<Mode>,
    /// Entry point(s).
    pub entry: Option<Entry>,
    /// Output directory.
    pub output_path: Option<Utf8PathBuf>,
    /// Public URL prefix for emitted assets; defaults to `/`.
    pub public_path: Option<String>,
    /// Emit source maps; defaults to `true` in development.
    pub source_map: Option<bool>,
    /// Compilation target(s).
    pub target: Option<Vec<String>>,
}

/// Options for every `with_react` preset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithReactOptions {
    /// Enable fast refresh; defaults to `true` in development.
    pub refresh: Option<bool>,
    /// JSX runtime.
    pub runtime: Option<JsxRuntime>,
    /// Use the development JSX transform; defaults to `true` in development.
    pub development: Option<bool>,
    /// Module providing the JSX runtime; defaults to `react`.
    pub import_source: Option<String>,
}

/// Options for [`crate::presets::common::with_env`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithEnvOptions {
    /// Variables defined regardless of prefix or `systemvars`.
    pub variables: BTreeMap<String, String>,
    /// Prefix selecting environment variables; defaults to `REACT_APP_`.
    pub prefix: Option<String>,
    /// Read variables from the injected source; defaults to `true`.
    pub systemvars: Option<bool>,
}

/// `stem.[contenthash].ext` in production, `stem.ext` otherwise.
pub(crate) fn hashed_name(mode: Mode, stem: &str, ext: &str) -> String {
    if mode.is_production() {
        format!("{stem}.[contenthash].{ext}")
    } else {
        format!("{stem}.{ext}")
    }
}
