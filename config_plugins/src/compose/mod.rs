//! Folding an ordered list of plugins into one.
//!
//! [`Composer`] collects plugins in declaration order and
//! [`Composer::build`] turns them into a [`ComposedPlugin`]. Running the
//! composed plugin threads the configuration through every step, stopping
//! at the first step that fails or breaks the contract.

mod composed;
mod composer;
mod registry;
mod step;

pub use composed::ComposedPlugin;
pub use composer::{Composer, compose};
pub use registry::PluginRegistry;
