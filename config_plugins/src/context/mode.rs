//! Execution mode recognised by every plugin context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ComposeError;

/// Build mode a composition run targets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Unoptimised builds with source maps and hot reloading.
    #[default]
    Development,
    /// Optimised, minified builds.
    Production,
    /// No mode-specific defaults.
    None,
}

impl Mode {
    /// Lowercase name as used by bundler configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::None => "none",
        }
    }

    /// Returns `true` for [`Mode::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Returns `true` for [`Mode::Production`].
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "none" => Ok(Self::None),
            other => Err(ComposeError::Validation {
                key: "mode".to_owned(),
                message: format!(
                    "unknown mode '{other}'; expected one of \"development\", \"production\", or \"none\""
                ),
            }),
        }
    }
}
