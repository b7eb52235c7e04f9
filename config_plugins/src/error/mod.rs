//! Error types produced while composing and merging configuration.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{ComposeError, Violation};
