//! Plugins shared by the integration and behavioural tests.
//!
//! Every plugin here records its name in a [`CallLog`] before doing
//! anything else, so tests can assert exactly which plugins ran.

use config_plugins::merge::merge;
use config_plugins::{Context, IntoPluginError, Plugin, PluginExt, try_from_fn};
use serde_json::{Value, json};
use test_helpers::CallLog;

/// Wrap `value` in one mapping per segment of the dotted `key`.
pub fn layer(key: &str, value: Value) -> Value {
    key.rsplit('.')
        .fold(value, |inner, segment| json!({ segment: inner }))
}

/// Records `name`, then merges `value` in at the dotted `key`.
pub fn setter(
    log: &CallLog,
    name: &str,
    key: &str,
    value: Value,
) -> impl Plugin<Value> + Send + Sync + use<> {
    let handle = log.clone();
    let label = name.to_owned();
    let patch = layer(key, value);
    try_from_fn(move |config: Value, _ctx: &Context| {
        handle.record(label.as_str());
        merge(&config, [&patch]).into_plugin()
    })
    .named(name.to_owned())
}

/// Records `name`, then fails with `message`.
pub fn failing(log: &CallLog, name: &str, message: &str) -> impl Plugin<Value> + Send + Sync + use<> {
    let handle = log.clone();
    let label = name.to_owned();
    let reason = message.to_owned();
    try_from_fn(move |_config: Value, _ctx: &Context| {
        handle.record(label.as_str());
        Err(reason.clone().into())
    })
    .named(name.to_owned())
}

/// Records `name`, then returns a sequence instead of a mapping.
pub fn listing(log: &CallLog, name: &str) -> impl Plugin<Value> + Send + Sync + use<> {
    let handle = log.clone();
    let label = name.to_owned();
    try_from_fn(move |_config: Value, _ctx: &Context| {
        handle.record(label.as_str());
        Ok(json!(["not", "a", "mapping"]))
    })
    .named(name.to_owned())
}

/// Records `name`, then stores the context's mode under `name`.
pub fn mode_probe(log: &CallLog, name: &str) -> impl Plugin<Value> + Send + Sync + use<> {
    let handle = log.clone();
    let label = name.to_owned();
    try_from_fn(move |config: Value, ctx: &Context| {
        handle.record(label.as_str());
        merge(&config, [&layer(&label, json!(ctx.mode().as_str()))]).into_plugin()
    })
    .named(name.to_owned())
}
