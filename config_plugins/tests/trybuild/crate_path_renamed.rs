//! Generated code must reference the crate through the configured path.

use config_plugins as plugins;
use plugins::{ConfigSchema, MergeRules};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, ConfigSchema)]
#[compose(crate = "plugins")]
struct AliasedConfig {
    #[compose(policy = "prefer_existing")]
    mode: Option<String>,
}

fn main() {
    let rules: MergeRules = AliasedConfig::merge_rules();
    let _ = plugins::merge::merge_declared(&AliasedConfig::default(), [&AliasedConfig::default()]);
    let _ = rules;
}
