//! Steps that load a plugin context from the environment.

use anyhow::Result;
use config_plugins::Context;
use rstest_bdd_macros::{given, when};
use serde_json::json;
use test_helpers::figment::with_jail;
use test_helpers::text::unquote;

use crate::fixtures::CompositionState;

#[given("the environment variable {name} is {value}")]
fn environment_variable(
    composition_state: &CompositionState,
    name: String,
    value: String,
) -> Result<()> {
    let mut vars = composition_state.environment.take().unwrap_or_default();
    vars.push((unquote(&name).to_owned(), unquote(&value).to_owned()));
    composition_state.environment.set(vars);
    Ok(())
}

#[when("the plugins run with a context loaded from prefix {prefix}")]
fn plugins_run_with_loaded_context(
    composition_state: &CompositionState,
    prefix: String,
) -> Result<()> {
    let vars = composition_state.environment.take().unwrap_or_default();
    let loaded = with_jail(|jail| {
        for (name, value) in &vars {
            jail.set_env(name, value);
        }
        Ok(Context::load(unquote(&prefix)))
    })?;
    let chain = composition_state
        .composer
        .take()
        .unwrap_or_default()
        .build();
    composition_state
        .outcome
        .set(loaded.and_then(|context| chain.run(json!({}), &context)));
    Ok(())
}
