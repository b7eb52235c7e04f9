//! Helpers for running test code inside a `figment::Jail`.
//!
//! A jail isolates environment variables and the working directory for the
//! duration of a closure. These helpers surface the closure's value as an
//! `anyhow::Result` so callers can use `?` without `Option` plumbing.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure returns a
/// [`figment::error::Error`].
///
/// # Examples
///
/// ```
/// let value = test_helpers::figment::with_jail(|jail| {
///     jail.set_env("APP_MODE", "production");
///     Ok(std::env::var("APP_MODE").unwrap_or_default())
/// })?;
/// assert_eq!(value, "production");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Useful inside jail closures when a step fails with a non-Figment error.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers often own the error and passing by value avoids extra clones"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
