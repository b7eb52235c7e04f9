//! Steps that register plugins by name and resolve chains from names.

use anyhow::{Result, anyhow, ensure};
use config_plugins::{ComposeError, Context, PluginRegistry, Violation};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};
use test_helpers::text::{list, unquote};

use crate::common::setter;
use crate::fixtures::CompositionState;

#[given("a registry holding {names}")]
fn registry_holding(composition_state: &CompositionState, names: String) -> Result<()> {
    let log = composition_state.call_log();
    let registry = list(&names)
        .into_iter()
        .fold(PluginRegistry::new(), |registry, name| {
            let plugin = setter(&log, &name, &name, Value::Bool(true));
            registry.with(name, plugin)
        });
    composition_state.registry.set(registry);
    Ok(())
}

#[when("the names {names} are resolved")]
fn names_resolved(composition_state: &CompositionState, names: String) -> Result<()> {
    let resolved = composition_state
        .registry
        .with_ref(|registry| registry.resolve(list(&names)).build())
        .ok_or_else(|| anyhow!("expected a registry"))?;
    composition_state.resolved.set(resolved);
    Ok(())
}

#[when("the resolved chain runs")]
fn resolved_chain_runs(composition_state: &CompositionState) -> Result<()> {
    let outcome = composition_state
        .resolved
        .with_ref(|chain| chain.run(json!({}), &Context::default()))
        .ok_or_else(|| anyhow!("expected a resolved chain"))?;
    composition_state.outcome.set(outcome);
    Ok(())
}

#[then("checking the chain reports {name} at index {index}")]
fn check_reports(composition_state: &CompositionState, name: String, index: usize) -> Result<()> {
    let checked = composition_state
        .resolved
        .with_ref(config_plugins::ComposedPlugin::check)
        .ok_or_else(|| anyhow!("expected a resolved chain"))?;
    let err = checked
        .err()
        .ok_or_else(|| anyhow!("expected the check to fail"))?;
    ensure!(
        matches!(
            &*err,
            ComposeError::ContractViolation {
                index: at,
                plugin,
                violation: Violation::NotInvocable,
            } if *at == index && plugin == unquote(&name)
        ),
        "unexpected check failure: {err}"
    );
    Ok(())
}

#[then("checking the chain succeeds")]
fn check_succeeds(composition_state: &CompositionState) -> Result<()> {
    let checked = composition_state
        .resolved
        .with_ref(config_plugins::ComposedPlugin::check)
        .ok_or_else(|| anyhow!("expected a resolved chain"))?;
    checked.map_err(|err| anyhow!("check failed: {err}"))
}

#[then("the resolved chain is named {names}")]
fn resolved_names(composition_state: &CompositionState, names: String) -> Result<()> {
    let actual: Vec<String> = composition_state
        .resolved
        .with_ref(|chain| chain.plugin_names().map(|name| name.into_owned()).collect())
        .ok_or_else(|| anyhow!("expected a resolved chain"))?;
    let expected = list(&names);
    ensure!(actual == expected, "unexpected names {actual:?}; expected {expected:?}");
    Ok(())
}
