use config_plugins::merge::merge_declared;
use config_plugins::{ComposeResult, ConfigSchema, MergePolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, ConfigSchema)]
#[serde(rename_all = "camelCase")]
struct ServerConfig {
    port: Option<u16>,
    #[compose(policy = "prefer_existing")]
    host: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ConfigSchema)]
#[serde(rename_all = "camelCase")]
struct DevConfig {
    #[compose(policy = "prefer_incoming")]
    env_prefix: Vec<String>,
    #[compose(nested)]
    dev_server: ServerConfig,
    #[compose(nested, policy = "recurse")]
    preview_server: Option<ServerConfig>,
}

fn main() {
    let rules = DevConfig::merge_rules();
    assert_eq!(rules.policy("devServer.host"), MergePolicy::PreferExisting);
    let merged: ComposeResult<DevConfig> =
        merge_declared(&DevConfig::default(), [&DevConfig::default()]);
    let _ = merged;
}
