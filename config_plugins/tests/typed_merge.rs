//! Typed configurations composed through `#[derive(ConfigSchema)]`.

use anyhow::Result;
use config_plugins::merge::{merge, merge_declared};
use config_plugins::{
    ConfigSchema, Context, IntoPluginError, Merge, MergePolicy, Mode, Shape, Structural, compose,
    try_from_fn,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ConfigSchema)]
#[serde(rename_all = "camelCase")]
struct OutputConfig {
    path: Option<String>,
    #[compose(policy = "prefer_existing")]
    public_path: Option<String>,
    clean: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ConfigSchema)]
#[serde(rename_all = "camelCase")]
struct BundleConfig {
    #[compose(policy = "prefer_existing")]
    mode: Option<String>,
    #[compose(nested)]
    output: Option<OutputConfig>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(rename = "devServerPort")]
    port: Option<u16>,
    #[serde(skip)]
    scratch: Option<String>,
}

#[test]
fn derived_rules_follow_serde_names() {
    let rules = BundleConfig::merge_rules();
    assert_eq!(rules.policy("mode"), MergePolicy::PreferExisting);
    assert_eq!(rules.policy("output.publicPath"), MergePolicy::PreferExisting);
    assert_eq!(rules.policy("output.path"), MergePolicy::Recurse);
    assert_eq!(rules.policy("devServerPort"), MergePolicy::Recurse);
}

#[test]
fn unset_fields_do_not_clear_the_target() -> Result<()> {
    let target = BundleConfig {
        mode: Some("production".into()),
        output: Some(OutputConfig {
            path: Some("dist".into()),
            public_path: Some("/".into()),
            clean: None,
        }),
        extensions: vec![".ts".into()],
        port: Some(3000),
        scratch: Some("not serialised".into()),
    };
    let source = BundleConfig {
        mode: Some("development".into()),
        output: Some(OutputConfig {
            path: None,
            public_path: Some("/cdn/".into()),
            clean: Some(true),
        }),
        extensions: vec![".tsx".into(), ".ts".into()],
        ..BundleConfig::default()
    };
    let merged = merge_declared(&target, [&source])?;
    assert_eq!(merged.mode.as_deref(), Some("production"));
    assert_eq!(
        merged.output,
        Some(OutputConfig {
            path: Some("dist".into()),
            public_path: Some("/".into()),
            clean: Some(true),
        })
    );
    assert_eq!(merged.extensions, [".tsx", ".ts"]);
    assert_eq!(merged.port, Some(3000));
    assert!(merged.scratch.is_none(), "skipped fields reset to their default");
    Ok(())
}

#[test]
fn default_rules_let_sources_win() -> Result<()> {
    let target = OutputConfig {
        public_path: Some("/".into()),
        ..OutputConfig::default()
    };
    let source = OutputConfig {
        public_path: Some("/cdn/".into()),
        ..OutputConfig::default()
    };
    let merged = merge(&target, [&source])?;
    assert_eq!(merged.public_path.as_deref(), Some("/cdn/"));
    let explicit = target.merge_layers([&source], &OutputConfig::merge_rules())?;
    assert_eq!(explicit.public_path.as_deref(), Some("/"));
    Ok(())
}

#[test]
fn typed_configs_compose() -> Result<()> {
    assert_eq!(BundleConfig::default().shape(), Shape::Mapping);
    let base = try_from_fn(|config: BundleConfig, ctx: &Context| {
        let defaults = BundleConfig {
            mode: Some(ctx.mode().as_str().to_owned()),
            output: Some(OutputConfig {
                path: Some("dist".into()),
                ..OutputConfig::default()
            }),
            ..BundleConfig::default()
        };
        merge_declared(&defaults, [&config]).into_plugin()
    });
    let port = try_from_fn(|config: BundleConfig, _ctx: &Context| {
        let layer = BundleConfig {
            port: Some(8080),
            ..BundleConfig::default()
        };
        merge_declared(&config, [&layer]).into_plugin()
    });
    let chain = compose![base, port];
    let initial = BundleConfig {
        mode: Some("development".into()),
        ..BundleConfig::default()
    };
    let out = chain.run(initial, &Context::new().with_mode(Mode::Production))?;
    assert_eq!(out.mode.as_deref(), Some("production"));
    assert_eq!(out.port, Some(8080));
    assert_eq!(
        out.output.and_then(|output| output.path).as_deref(),
        Some("dist")
    );
    Ok(())
}
