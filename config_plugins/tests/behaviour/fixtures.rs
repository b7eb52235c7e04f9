//! Shared fixtures for the behavioural scenarios.

use config_plugins::{ComposeResult, ComposedPlugin, Composer, PluginRegistry};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use test_helpers::CallLog;

/// State shared by the composition, registry and context scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct CompositionState {
    pub log: Slot<CallLog>,
    pub composer: Slot<Composer<Value>>,
    pub registry: Slot<PluginRegistry<Value>>,
    pub resolved: Slot<ComposedPlugin<Value>>,
    pub environment: Slot<Vec<(String, String)>>,
    pub outcome: Slot<ComposeResult<Value>>,
}

impl CompositionState {
    /// Returns the call log, creating it on first use.
    pub fn call_log(&self) -> CallLog {
        self.log.get().unwrap_or_else(|| {
            let fresh = CallLog::default();
            self.log.set(fresh.clone());
            fresh
        })
    }

    /// Appends a plugin to the scenario's composer.
    pub fn push<P>(&self, plugin: P)
    where
        P: config_plugins::Plugin<Value> + Send + Sync + 'static,
    {
        let mut composer = self.composer.take().unwrap_or_default();
        composer.push(plugin);
        self.composer.set(composer);
    }
}

/// State shared by the bundler preset scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct PresetState {
    pub caller: Slot<Value>,
    pub outcome: Slot<ComposeResult<Value>>,
}

/// Creates a clean composition state for each scenario.
#[fixture]
pub fn composition_state() -> CompositionState {
    CompositionState::default()
}

/// Creates a clean preset state for each scenario.
#[fixture]
pub fn preset_state() -> PresetState {
    PresetState::default()
}
