//! Structural classification of configuration values.

use std::fmt;

use serde_json::Value;

/// Coarse shape of a configuration value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Shape {
    /// A keyed mapping; the only shape a plugin may return.
    Mapping,
    /// An ordered sequence.
    Sequence,
    /// A string, number or boolean.
    Scalar,
    /// An explicit null.
    Null,
}

impl Shape {
    /// Classify a JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Mapping,
            Value::Array(_) => Self::Sequence,
            Value::Null => Self::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar,
        }
    }

    /// Returns `true` for [`Shape::Mapping`].
    #[must_use]
    pub const fn is_mapping(self) -> bool {
        matches!(self, Self::Mapping)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
            Self::Null => "null",
        };
        f.write_str(label)
    }
}

/// Configuration types whose runtime shape the composer can inspect.
///
/// Typed configuration structs are always mappings, so the default method
/// is usually all they need:
///
/// ```rust
/// use config_plugins::{Shape, Structural};
///
/// struct BuildConfig {
///     out_dir: String,
/// }
///
/// impl Structural for BuildConfig {}
///
/// let cfg = BuildConfig { out_dir: "dist".into() };
/// assert_eq!(cfg.shape(), Shape::Mapping);
/// ```
pub trait Structural {
    /// Report the shape of this value.
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    /// The empty configuration a chain starts from when the caller supplies
    /// none.
    #[must_use]
    fn empty() -> Self
    where
        Self: Default,
    {
        Self::default()
    }
}

impl Structural for Value {
    fn shape(&self) -> Shape {
        Shape::of(self)
    }

    /// An empty mapping rather than `null`.
    fn empty() -> Self {
        Self::Object(serde_json::Map::new())
    }
}

impl Structural for serde_json::Map<String, Value> {}
