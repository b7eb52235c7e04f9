//! Constructors and aggregation helpers for `ComposeError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{AggregatedErrors, ComposeError, Violation};
use crate::Shape;

impl ComposeError {
    /// Tries to build a [`ComposeError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] holding that [`Arc`] when it is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(match Arc::try_unwrap(last) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }

    /// Build a [`ComposeError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`ComposeError::try_aggregate`] when
    /// the list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a contract violation for the step at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_plugins::{ComposeError, Violation};
    /// let e = ComposeError::contract_violation(1, "with-react", Violation::NotInvocable);
    /// assert!(e.to_string().contains("plugin 1 (`with-react`)"));
    /// ```
    #[must_use]
    pub fn contract_violation(index: usize, plugin: impl Into<String>, violation: Violation) -> Self {
        Self::ContractViolation {
            index,
            plugin: plugin.into(),
            violation,
        }
    }

    /// Construct a merge mismatch error at `path`.
    #[must_use]
    pub fn mismatch(path: impl Into<String>, existing: Shape, incoming: Shape) -> Self {
        Self::MergeTypeMismatch {
            path: path.into(),
            existing,
            incoming,
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use config_plugins::ComposeError;
    /// let fe = figment::Error::from("boom");
    /// let e = ComposeError::gathering(fe);
    /// assert!(matches!(e, ComposeError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns the zero-based index of the plugin that caused this error,
    /// if the error originated in a specific step.
    #[must_use]
    pub const fn plugin_index(&self) -> Option<usize> {
        match self {
            Self::ContractViolation { index, .. } | Self::PluginFailed { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}
