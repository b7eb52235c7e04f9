//! Primary error enum for composition and merge flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::Shape;

/// How a plugin broke the composition contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Violation {
    /// The step cannot be invoked, for example because its name did not
    /// resolve to a registered plugin.
    NotInvocable,
    /// The plugin returned something other than a mapping.
    NonStructural {
        /// Shape the plugin actually returned.
        found: Shape,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInvocable => f.write_str(
                "it is not a plugin accepting (config, context) and returning config",
            ),
            Self::NonStructural { found } => {
                write!(f, "it returned a {found} instead of a configuration mapping")
            }
        }
    }
}

/// Errors that can occur while composing plugins or merging configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A step in the chain broke the plugin contract.
    #[error("plugin {index} (`{plugin}`) violated the plugin contract: {violation}")]
    ContractViolation {
        /// Zero-based position of the offending step.
        index: usize,
        /// Diagnostic name of the offending step.
        plugin: String,
        /// What went wrong.
        violation: Violation,
    },

    /// A plugin reported its own failure.
    #[error("plugin {index} (`{plugin}`) failed: {source}")]
    PluginFailed {
        /// Zero-based position of the failing step.
        index: usize,
        /// Diagnostic name of the failing step.
        plugin: String,
        /// Error returned by the plugin.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A mapping was merged into a key holding a non-mapping value, the
    /// merge root was not a mapping, or a preset appended to a `plugins`
    /// entry that is not a sequence.
    #[error("cannot merge a {incoming} into a {existing} at '{path}'")]
    MergeTypeMismatch {
        /// Dotted path of the conflicting key; empty for the root.
        path: String,
        /// Shape already present in the target.
        existing: Shape,
        /// Shape supplied by the source.
        incoming: Shape,
    },

    /// Error while gathering context values from providers.
    #[error("Failed to gather plugin context: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Error converting between typed configuration and JSON values.
    #[error("configuration serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation failures when interpreting plugin options or context.
    #[error("Validation failed for '{key}': {message}")]
    Validation {
        /// Option or context key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Multiple errors were detected before composition started.
    #[error("multiple composition errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
