//! Aggregation container for several `ComposeError` values.

use std::{error::Error, fmt, sync::Arc};

use super::ComposeError;

/// Collection of [`ComposeError`]s detected in one pass over a chain.
///
/// # Examples
///
/// ```
/// use config_plugins::{ComposeError, Violation};
///
/// let unresolved = |index: usize, name: &str| ComposeError::ContractViolation {
///     index,
///     plugin: name.into(),
///     violation: Violation::NotInvocable,
/// };
/// let e = ComposeError::aggregate(vec![unresolved(0, "with-sass"), unresolved(2, "with-pwa")]);
/// if let ComposeError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<ComposeError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ComposeError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &ComposeError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a ComposeError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<ComposeError>>,
        fn(&'a Arc<ComposeError>) -> &'a ComposeError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<ComposeError>;
    type IntoIter = std::vec::IntoIter<Arc<ComposeError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
