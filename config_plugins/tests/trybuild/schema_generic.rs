use config_plugins::{ConfigSchema, Merge, MergeRules, Structural};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, ConfigSchema)]
struct Layered<T> {
    #[compose(policy = "prefer_existing")]
    value: Option<T>,
    label: Option<String>,
}

fn requires_merge<C: Merge + Structural>(config: &C) -> bool {
    config.merge_layers([config], &MergeRules::new()).is_ok()
}

fn main() {
    let layered: Layered<u32> = Layered::default();
    let _ = requires_merge(&layered);
    let _ = <Layered<String> as ConfigSchema>::merge_rules();
}
