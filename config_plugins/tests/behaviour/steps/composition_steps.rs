//! Steps that build and run plugin chains.

use anyhow::{Result, anyhow, ensure};
use config_plugins::{ComposeError, Context, Mode};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use test_helpers::text::{list, unquote};

use super::helpers::{composed, failure, lookup, parse_value, render};
use crate::common::{failing, listing, mode_probe, setter};
use crate::fixtures::CompositionState;

#[given("a plugin {name} that sets {key} to {value}")]
fn plugin_sets(
    composition_state: &CompositionState,
    name: String,
    key: String,
    value: String,
) -> Result<()> {
    let log = composition_state.call_log();
    composition_state.push(setter(&log, unquote(&name), unquote(&key), parse_value(&value)));
    Ok(())
}

#[given("a plugin {name} that fails with {message}")]
fn plugin_fails(composition_state: &CompositionState, name: String, message: String) -> Result<()> {
    let log = composition_state.call_log();
    composition_state.push(failing(&log, unquote(&name), unquote(&message)));
    Ok(())
}

#[given("a plugin {name} that returns a sequence")]
fn plugin_returns_sequence(composition_state: &CompositionState, name: String) -> Result<()> {
    let log = composition_state.call_log();
    composition_state.push(listing(&log, unquote(&name)));
    Ok(())
}

#[given("a plugin {name} that records the mode")]
fn plugin_records_mode(composition_state: &CompositionState, name: String) -> Result<()> {
    let log = composition_state.call_log();
    composition_state.push(mode_probe(&log, unquote(&name)));
    Ok(())
}

#[when("the plugins run in {mode} mode")]
fn plugins_run(composition_state: &CompositionState, mode: String) -> Result<()> {
    let parsed: Mode = unquote(&mode).parse().map_err(|err| anyhow!("{err}"))?;
    let chain = composition_state
        .composer
        .take()
        .unwrap_or_default()
        .build();
    let outcome = chain.run(json!({}), &Context::new().with_mode(parsed));
    composition_state.outcome.set(outcome);
    Ok(())
}

#[then("the configuration value at {key} is {expected}")]
fn configuration_value(
    composition_state: &CompositionState,
    key: String,
    expected: String,
) -> Result<()> {
    let config = composed(&composition_state.outcome)?;
    let dotted = unquote(&key);
    let actual = lookup(&config, dotted).ok_or_else(|| anyhow!("missing key {dotted} in {config}"))?;
    ensure!(
        render(actual) == unquote(&expected),
        "unexpected value at {dotted}: {actual}"
    );
    Ok(())
}

#[then("the configuration is empty")]
fn configuration_empty(composition_state: &CompositionState) -> Result<()> {
    let config = composed(&composition_state.outcome)?;
    ensure!(
        config.as_object().is_some_and(serde_json::Map::is_empty),
        "expected an empty mapping, got {config}"
    );
    Ok(())
}

#[then("the plugins ran in order {names}")]
fn plugins_ran_in_order(composition_state: &CompositionState, names: String) -> Result<()> {
    let expected = list(&names);
    let actual = composition_state.call_log().entries();
    ensure!(actual == expected, "unexpected call order {actual:?}; expected {expected:?}");
    Ok(())
}

#[then("composition fails with {message}")]
fn composition_fails_with(composition_state: &CompositionState, message: String) -> Result<()> {
    let actual = failure(&composition_state.outcome)?;
    ensure!(actual == unquote(&message), "unexpected failure: {actual}");
    Ok(())
}

#[then("plugin {index} named {name} violated the contract")]
fn contract_violation(
    composition_state: &CompositionState,
    index: usize,
    name: String,
) -> Result<()> {
    let outcome = composition_state
        .outcome
        .get()
        .ok_or_else(|| anyhow!("expected the plugins to have run"))?;
    let err = outcome
        .err()
        .ok_or_else(|| anyhow!("expected a contract violation"))?;
    ensure!(
        matches!(
            &*err,
            ComposeError::ContractViolation { index: at, plugin, .. }
                if *at == index && plugin == unquote(&name)
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("composition fails mentioning {text}")]
fn composition_fails_mentioning(composition_state: &CompositionState, text: String) -> Result<()> {
    let actual = failure(&composition_state.outcome)?;
    ensure!(
        actual.contains(unquote(&text)),
        "failure {actual:?} does not mention {text}"
    );
    Ok(())
}
