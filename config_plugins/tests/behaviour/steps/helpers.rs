//! Helpers shared by the step modules.

use anyhow::{Result, anyhow};
use config_plugins::ComposeResult;
use rstest_bdd::Slot;
use serde_json::Value;
use test_helpers::text::unquote;

/// Interprets a step argument as JSON, falling back to a plain string.
pub(crate) fn parse_value(raw: &str) -> Value {
    let text = unquote(raw);
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Looks up a dotted path such as `output.path`.
pub(crate) fn lookup<'a>(config: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(config, |node, segment| node.get(segment))
}

/// Renders a value the way feature files spell it: strings bare, the rest
/// as JSON.
pub(crate) fn render(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}

/// Returns the configuration a successful run produced.
pub(crate) fn composed(outcome: &Slot<ComposeResult<Value>>) -> Result<Value> {
    outcome
        .get()
        .ok_or_else(|| anyhow!("expected the plugins to have run"))?
        .map_err(|err| anyhow!("composition failed unexpectedly: {err}"))
}

/// Returns the error a failed run produced.
pub(crate) fn failure(outcome: &Slot<ComposeResult<Value>>) -> Result<String> {
    match outcome
        .get()
        .ok_or_else(|| anyhow!("expected the plugins to have run"))?
    {
        Ok(config) => Err(anyhow!("expected a failure, got {config}")),
        Err(err) => Ok(err.to_string()),
    }
}
