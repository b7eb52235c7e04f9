//! Vite bindings.
//!
//! Vite loads its configuration by calling a function with a
//! [`ConfigEnv`]. [`compose_plugins`] produces that function from a
//! composed chain: each call resolves the environment into a
//! [`ViteContext`] and runs the chain from an empty mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ComposeError, Context};

mod compose;
mod with_base;
mod with_pwa;
mod with_react;

pub use compose::{ViteConfigFn, compose_plugins, create_base_config};
pub use with_base::{WithBase, with_base};
pub use with_pwa::{RegisterType, Strategy, WithPwa, WithPwaOptions, with_pwa};
pub use with_react::{ReactIntegrations, WithReact, with_react};

/// Vite CLI command being run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// `vite build`.
    Build,
    /// `vite` / `vite dev`.
    #[default]
    Serve,
}

impl Command {
    /// Lowercase name as Vite reports it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Serve => "serve",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "build" => Ok(Self::Build),
            "serve" | "dev" => Ok(Self::Serve),
            other => Err(ComposeError::Validation {
                key: String::from("command"),
                message: format!("unknown command '{other}'; expected build or serve"),
            }),
        }
    }
}

/// Arguments Vite passes to a configuration function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEnv {
    /// `build` or `serve`.
    pub command: String,
    /// Mode name, usually `development` or `production`.
    pub mode: String,
    /// Set for server-side rendering builds.
    #[serde(default)]
    pub is_ssr_build: bool,
    /// Set when running `vite preview`.
    #[serde(default)]
    pub is_preview: bool,
}

impl ConfigEnv {
    /// Environment for `command` in `mode`.
    #[must_use]
    pub fn new(command: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            mode: mode.into(),
            ..Self::default()
        }
    }
}

/// Context handed to Vite plugins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViteContext {
    base: Context,
    command: Option<Command>,
    is_ssr_build: bool,
    is_preview: bool,
}

impl ViteContext {
    /// Wrap a base context.
    #[must_use]
    pub const fn new(base: Context) -> Self {
        Self {
            base,
            command: None,
            is_ssr_build: false,
            is_preview: false,
        }
    }

    /// Record the command being run.
    #[must_use]
    pub const fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    /// Mark this as a server-side rendering build.
    #[must_use]
    pub const fn with_ssr_build(mut self, ssr: bool) -> Self {
        self.is_ssr_build = ssr;
        self
    }

    /// Mark this as a `vite preview` run.
    #[must_use]
    pub const fn with_preview(mut self, preview: bool) -> Self {
        self.is_preview = preview;
        self
    }

    /// Command being run, if Vite reported one.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        self.command
    }

    /// Returns `true` for server-side rendering builds.
    #[must_use]
    pub const fn is_ssr_build(&self) -> bool {
        self.is_ssr_build
    }

    /// Returns `true` under `vite preview`.
    #[must_use]
    pub const fn is_preview(&self) -> bool {
        self.is_preview
    }
}

impl AsRef<Context> for ViteContext {
    fn as_ref(&self) -> &Context {
        &self.base
    }
}

impl TryFrom<&ConfigEnv> for ViteContext {
    type Error = ComposeError;

    /// Resolve Vite's environment, rejecting unknown modes and commands.
    fn try_from(env: &ConfigEnv) -> Result<Self, Self::Error> {
        let mode = env.mode.parse()?;
        let command = env.command.parse()?;
        Ok(Self::new(Context::new().with_mode(mode))
            .with_command(command)
            .with_ssr_build(env.is_ssr_build)
            .with_preview(env.is_preview))
    }
}
