//! Trait-based conversions between external error types and `ComposeError`.

use figment::Error as FigmentError;

use super::ComposeError;

impl From<FigmentError> for ComposeError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<ComposeError> for FigmentError {
    /// Allow using `?` in tests that run inside `figment::Jail`.
    fn from(e: ComposeError) -> Self {
        match e {
            ComposeError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
