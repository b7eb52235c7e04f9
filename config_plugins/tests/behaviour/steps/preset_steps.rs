//! Steps that run the bundler presets end to end.

use anyhow::{Result, anyhow, ensure};
use config_plugins::merge::merge;
use config_plugins::presets::capability::DescriptorIntegration;
use config_plugins::presets::rsbuild::{RsbuildContext, RsbuildTarget};
use config_plugins::presets::rspack::RspackContext;
use config_plugins::presets::vite::{self, ConfigEnv, ReactIntegrations, WithPwaOptions};
use config_plugins::presets::{WithBaseOptions, WithReactOptions, rsbuild, rspack};
use config_plugins::{Context, Mode, compose};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};
use test_helpers::text::{list, unquote};

use super::helpers::{composed, failure, lookup, parse_value, render};
use crate::common::layer;
use crate::fixtures::PresetState;

#[given("the caller sets {key} to {value}")]
fn caller_sets(preset_state: &PresetState, key: String, value: String) -> Result<()> {
    let current = preset_state.caller.take().unwrap_or_else(|| json!({}));
    let patch = layer(unquote(&key), parse_value(&value));
    let merged = merge(&current, [&patch]).map_err(|err| anyhow!("{err}"))?;
    preset_state.caller.set(merged);
    Ok(())
}

#[when("the vite presets run for command {command} in mode {mode}")]
fn vite_presets_run(preset_state: &PresetState, command: String, mode: String) -> Result<()> {
    let config_fn = vite::compose_plugins(compose![
        vite::with_base(WithBaseOptions::default()),
        vite::with_react(
            WithReactOptions::default(),
            ReactIntegrations::primary(DescriptorIntegration::shared("@vitejs/plugin-react")),
        ),
        vite::with_pwa(
            WithPwaOptions::default(),
            Some(DescriptorIntegration::shared("vite-plugin-pwa")),
        ),
    ]);
    let env = ConfigEnv::new(unquote(&command), unquote(&mode));
    preset_state.outcome.set(config_fn.call(&env));
    Ok(())
}

#[when("the rspack presets run in {mode} mode")]
fn rspack_presets_run(preset_state: &PresetState, mode: String) -> Result<()> {
    let parsed: Mode = unquote(&mode).parse().map_err(|err| anyhow!("{err}"))?;
    let chain = compose![
        rspack::with_base(WithBaseOptions::default()),
        rspack::with_react(
            WithReactOptions::default(),
            Some(DescriptorIntegration::shared("@rspack/plugin-react-refresh")),
        ),
    ];
    let initial = preset_state.caller.take().unwrap_or_else(|| json!({}));
    let ctx = RspackContext::new(Context::new().with_mode(parsed));
    preset_state.outcome.set(chain.run(initial, &ctx));
    Ok(())
}

#[when("the rsbuild presets run for target {target}")]
fn rsbuild_presets_run(preset_state: &PresetState, target: String) -> Result<()> {
    let parsed: RsbuildTarget = serde_json::from_value(Value::String(unquote(&target).to_owned()))?;
    let chain = compose![
        rsbuild::with_base(WithBaseOptions::default()),
        rsbuild::with_react(
            WithReactOptions::default(),
            Some(DescriptorIntegration::shared("@rsbuild/plugin-react")),
        ),
    ];
    let initial = preset_state.caller.take().unwrap_or_else(|| json!({}));
    let ctx = RsbuildContext::new(Context::default()).with_target(parsed);
    preset_state.outcome.set(chain.run(initial, &ctx));
    Ok(())
}

#[then("the preset value at {key} is {expected}")]
fn preset_value(preset_state: &PresetState, key: String, expected: String) -> Result<()> {
    let config = composed(&preset_state.outcome)?;
    let dotted = unquote(&key);
    let actual = lookup(&config, dotted).ok_or_else(|| anyhow!("missing key {dotted} in {config}"))?;
    ensure!(
        render(actual) == unquote(&expected),
        "unexpected value at {dotted}: {actual}"
    );
    Ok(())
}

#[then("the preset plugins are {names}")]
fn preset_plugins(preset_state: &PresetState, names: String) -> Result<()> {
    let config = composed(&preset_state.outcome)?;
    let actual: Vec<String> = config["plugins"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|plugin| plugin["name"].as_str().map(ToOwned::to_owned))
        .collect();
    let expected = list(&names);
    ensure!(actual == expected, "unexpected plugins {actual:?}; expected {expected:?}");
    Ok(())
}

#[then("the presets fail mentioning {text}")]
fn presets_fail(preset_state: &PresetState, text: String) -> Result<()> {
    let message = failure(&preset_state.outcome)?;
    ensure!(
        message.contains(unquote(&text)),
        "failure {message:?} does not mention {text}"
    );
    Ok(())
}
