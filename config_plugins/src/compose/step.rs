//! A single entry in a plugin chain.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{ComposeError, Plugin, Structural, Violation};

/// Shared handle to a type-erased plugin.
pub(crate) type SharedPlugin<C, X> = Arc<dyn Plugin<C, X> + Send + Sync>;

pub(crate) enum Step<C, X> {
    Plugin(SharedPlugin<C, X>),
    /// A name that did not resolve to a plugin.
    Unresolved { name: String },
}

impl<C, X> Step<C, X> {
    pub(crate) fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Plugin(plugin) => plugin.name(),
            Self::Unresolved { name } => Cow::Borrowed(name),
        }
    }

    pub(crate) const fn is_invocable(&self) -> bool {
        matches!(self, Self::Plugin(_))
    }

    pub(crate) fn not_invocable(&self, index: usize) -> ComposeError {
        ComposeError::contract_violation(index, self.name(), Violation::NotInvocable)
    }
}

impl<C: Structural, X> Step<C, X> {
    /// Apply this step to `config`, enforcing the plugin contract.
    pub(crate) fn invoke(&self, index: usize, config: C, context: &X) -> Result<C, ComposeError> {
        let Self::Plugin(plugin) = self else {
            return Err(self.not_invocable(index));
        };
        tracing::trace!(index, plugin = %plugin.name(), "applying plugin");
        let next = plugin
            .apply(config, context)
            .map_err(|source| ComposeError::PluginFailed {
                index,
                plugin: plugin.name().into_owned(),
                source,
            })?;
        let found = next.shape();
        if !found.is_mapping() {
            return Err(ComposeError::contract_violation(
                index,
                plugin.name(),
                Violation::NonStructural { found },
            ));
        }
        Ok(next)
    }
}

impl<C, X> Clone for Step<C, X> {
    fn clone(&self) -> Self {
        match self {
            Self::Plugin(plugin) => Self::Plugin(Arc::clone(plugin)),
            Self::Unresolved { name } => Self::Unresolved { name: name.clone() },
        }
    }
}

impl<C, X> fmt::Debug for Step<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plugin(plugin) => f.debug_tuple("Plugin").field(&plugin.name()).finish(),
            Self::Unresolved { name } => f
                .debug_struct("Unresolved")
                .field("name", name)
                .finish(),
        }
    }
}
