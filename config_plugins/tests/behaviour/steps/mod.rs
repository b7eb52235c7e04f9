//! Behavioural step modules registered with `rstest-bdd`.

pub mod composition_steps;
pub mod context_steps;
pub mod helpers;
pub mod preset_steps;
pub mod registry_steps;
