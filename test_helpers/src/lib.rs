//! Test helpers shared across crates.
//!
//! This crate provides a recorder for observing plugin invocations, helpers
//! for running code inside a [`figment::Jail`], and text normalisation for
//! behavioural step definitions.

pub mod figment;
pub mod recorder;
pub mod text;

pub use recorder::CallLog;
