//! Behavioural test harness for `config_plugins` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files in `tests/features` to the shared fixtures.

#[path = "../common/mod.rs"]
mod common;
mod fixtures;
mod scenarios;
pub mod steps;
