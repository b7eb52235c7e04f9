//! Unit tests for context defaults, builders and loading.

use std::str::FromStr;

use anyhow::{Result, ensure};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

use super::{Context, Mode};
use crate::ComposeError;

#[test]
fn empty_context_uses_documented_defaults() {
    let ctx = Context::new();
    assert_eq!(ctx.mode(), Mode::Development);
    assert_eq!(ctx.explicit_mode(), None);
    assert_eq!(ctx.output_path().as_str(), "dist");
    assert!(ctx.explicit_output_path().is_none());
    assert!(ctx.project_root().is_none());
    assert!(ctx.source_root().is_none());
    assert!(ctx.extensions().is_empty());
}

#[test]
fn builders_record_every_field() {
    let ctx = Context::new()
        .with_mode(Mode::None)
        .with_project_root("/srv/app")
        .with_source_root("src")
        .with_output_path("out")
        .with_extension("isPreview", true);
    assert_eq!(ctx.explicit_mode(), Some(Mode::None));
    assert_eq!(ctx.project_root().map(|p| p.as_str()), Some("/srv/app"));
    assert_eq!(ctx.source_root().map(|p| p.as_str()), Some("src"));
    assert_eq!(ctx.output_path().as_str(), "out");
    assert_eq!(ctx.extension("isPreview"), Some(&json!(true)));
}

#[rstest]
#[case("development", Mode::Development)]
#[case("Production", Mode::Production)]
#[case(" none ", Mode::None)]
fn parses_known_modes(#[case] raw: &str, #[case] expected: Mode) {
    assert_eq!(Mode::from_str(raw).ok(), Some(expected));
}

#[test]
fn rejects_unknown_modes() {
    let err = Mode::from_str("staging").err();
    assert!(
        matches!(&err, Some(ComposeError::Validation { key, .. }) if key == "mode"),
        "expected a validation error, got {err:?}"
    );
}

#[derive(Debug, Deserialize, PartialEq)]
struct DevServer {
    port: u16,
}

#[test]
fn decodes_typed_extensions() -> Result<()> {
    let ctx = Context::new().with_extension("server", json!({"port": 5173}));
    let server: Option<DevServer> = ctx.extension_as("server").map_err(|e| anyhow::anyhow!(e))?;
    ensure!(server == Some(DevServer { port: 5173 }), "unexpected {server:?}");
    let missing: Option<DevServer> = ctx.extension_as("proxy").map_err(|e| anyhow::anyhow!(e))?;
    ensure!(missing.is_none(), "absent extensions decode to None");
    Ok(())
}

#[test]
fn reports_mistyped_extensions() {
    let ctx = Context::new().with_extension("server", "localhost");
    let err = ctx.extension_as::<DevServer>("server").err();
    assert!(matches!(
        err.as_deref(),
        Some(ComposeError::Serialization(_))
    ));
}

#[test]
fn loads_from_prefixed_environment() -> Result<()> {
    let ctx = test_helpers::figment::with_jail(|jail| {
        jail.clear_env();
        jail.set_env("BUNDLE_MODE", "production");
        jail.set_env("BUNDLE_PROJECT_ROOT", "/work/site");
        jail.set_env("BUNDLE_COMMAND", "build");
        Context::load("BUNDLE_").map_err(test_helpers::figment::figment_error)
    })?;
    ensure!(ctx.mode() == Mode::Production, "mode comes from the environment");
    ensure!(
        ctx.project_root().map(|p| p.as_str()) == Some("/work/site"),
        "project root comes from the environment"
    );
    ensure!(
        ctx.extension("command") == Some(&json!("build")),
        "unknown variables become extensions"
    );
    Ok(())
}

#[test]
fn environment_overrides_seeded_values() -> Result<()> {
    let seeded = Context::new().with_output_path("build").with_mode(Mode::Development);
    let ctx = test_helpers::figment::with_jail(|jail| {
        jail.clear_env();
        jail.set_env("BUNDLE_MODE", "none");
        Context::from_figment(&seeded.figment("BUNDLE_"))
            .map_err(test_helpers::figment::figment_error)
    })?;
    ensure!(ctx.mode() == Mode::None, "environment wins over seeded mode");
    ensure!(ctx.output_path().as_str() == "build", "seeded output path survives");
    Ok(())
}

#[test]
fn invalid_environment_mode_is_a_gathering_error() -> Result<()> {
    let outcome = test_helpers::figment::with_jail(|jail| {
        jail.clear_env();
        jail.set_env("BUNDLE_MODE", "turbo");
        Ok(Context::load("BUNDLE_"))
    })?;
    let err = outcome.err();
    ensure!(
        matches!(err.as_deref(), Some(ComposeError::Gathering(_))),
        "expected gathering error, got {err:?}"
    );
    Ok(())
}
