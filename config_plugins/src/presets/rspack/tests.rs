//! Unit tests for the Rspack presets.

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::presets::capability::DescriptorIntegration;
use crate::presets::{Entry, WithBaseOptions, WithReactOptions};
use crate::{Context, Mode, Plugin, compose};

#[fixture]
fn dev() -> RspackContext {
    RspackContext::new(Context::new().with_mode(Mode::Development))
}

#[fixture]
fn prod() -> RspackContext {
    RspackContext::new(Context::new().with_mode(Mode::Production))
}

#[rstest]
fn base_development_defaults(dev: RspackContext) {
    let config = with_base(WithBaseOptions::default())
        .apply(json!({}), &dev)
        .expect("with_base succeeds");
    assert_eq!(config["mode"], "development");
    assert_eq!(config["entry"], "./src/main.ts");
    assert_eq!(config["target"], "web");
    assert_eq!(config["output"]["filename"], "[name].js");
    assert_eq!(config["output"]["chunkFilename"], "[name].chunk.js");
    assert_eq!(config["output"]["clean"], true);
    assert_eq!(config["devtool"], "eval-source-map");
    assert_eq!(config["experiments"]["css"], true);
    assert_eq!(
        config["optimization"]["splitChunks"]["cacheGroups"]["vendor"]["name"],
        "vendors"
    );
    let rules = config["module"]["rules"].as_array().expect("rules sequence");
    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[1]["use"][0]["options"]["jsc"]["transform"]["react"]["refresh"],
        true
    );
}

#[rstest]
fn base_production_hashes_names(prod: RspackContext) {
    let config = with_base(WithBaseOptions::default())
        .apply(json!({}), &prod)
        .expect("with_base succeeds");
    assert_eq!(config["output"]["filename"], "[name].[contenthash].js");
    assert_eq!(config["output"]["chunkFilename"], "[name].[contenthash].chunk.js");
    assert_eq!(config["devtool"], false);
}

#[rstest]
fn production_source_maps_are_opt_in(prod: RspackContext) {
    let options = WithBaseOptions {
        source_map: Some(true),
        ..WithBaseOptions::default()
    };
    let config = with_base(options)
        .apply(json!({}), &prod)
        .expect("with_base succeeds");
    assert_eq!(config["devtool"], "source-map");
}

#[rstest]
fn base_without_source_maps_disables_devtool(dev: RspackContext) {
    let options = WithBaseOptions {
        source_map: Some(false),
        ..WithBaseOptions::default()
    };
    let config = with_base(options)
        .apply(json!({"devtool": "cheap-source-map"}), &dev)
        .expect("with_base succeeds");
    assert_eq!(config["devtool"], false);
}

#[rstest]
fn context_devtool_and_target_win(prod: RspackContext) {
    let ctx = prod
        .with_devtool(Devtool::Named("hidden-source-map".into()))
        .with_target(["node"]);
    let config = with_base(WithBaseOptions::default())
        .apply(json!({}), &ctx)
        .expect("with_base succeeds");
    assert_eq!(config["devtool"], "hidden-source-map");
    assert_eq!(config["target"], "node");
}

#[rstest]
fn options_target_beats_context(dev: RspackContext) {
    let options = WithBaseOptions {
        target: Some(vec!["web".into(), "es2020".into()]),
        entry: Some(Entry::Many(vec!["./a.ts".into(), "./b.ts".into()])),
        ..WithBaseOptions::default()
    };
    let config = with_base(options)
        .apply(json!({}), &dev.with_target(["node"]))
        .expect("with_base succeeds");
    assert_eq!(config["target"], json!(["web", "es2020"]));
    assert_eq!(config["entry"], json!(["./a.ts", "./b.ts"]));
}

#[rstest]
fn caller_entry_target_and_rules_survive(dev: RspackContext) {
    let incoming = json!({
        "entry": "./app.tsx",
        "target": "electron-renderer",
        "output": {"publicPath": "/static/"},
        "module": {"rules": [{"test": "\\.md$", "type": "asset/source"}]},
    });
    let config = with_base(WithBaseOptions::default())
        .apply(incoming, &dev)
        .expect("with_base succeeds");
    assert_eq!(config["entry"], "./app.tsx");
    assert_eq!(config["target"], "electron-renderer");
    assert_eq!(config["output"]["publicPath"], "/static/");
    assert_eq!(config["output"]["path"], "dist");
    assert_eq!(
        config["module"]["rules"],
        json!([{"test": "\\.md$", "type": "asset/source"}])
    );
}

#[rstest]
fn react_appends_rule_and_refresh_in_development(dev: RspackContext) {
    let plugin = with_react(
        WithReactOptions {
            import_source: Some("@emotion/react".into()),
            ..WithReactOptions::default()
        },
        Some(DescriptorIntegration::shared("@rspack/plugin-react-refresh")),
    );
    let incoming = json!({
        "module": {"rules": [{"test": "\\.svg$"}]},
        "resolve": {"extensions": [".json", ".ts", ".wasm"]},
        "plugins": [{"name": "html"}],
    });
    let config = plugin.apply(incoming, &dev).expect("with_react succeeds");

    let rules = config["module"]["rules"].as_array().expect("rules sequence");
    assert_eq!(rules.len(), 2);
    let react = &rules[1]["use"][0]["options"]["jsc"]["transform"]["react"];
    assert_eq!(react["importSource"], "@emotion/react");
    assert_eq!(react["development"], true);
    assert_eq!(rules[1]["exclude"], "node_modules");
    assert_eq!(
        config["resolve"]["extensions"],
        json!([".tsx", ".ts", ".jsx", ".js", ".json", ".wasm"])
    );
    assert_eq!(
        config["plugins"],
        json!([
            {"name": "html"},
            {"name": "@rspack/plugin-react-refresh", "options": {}},
        ])
    );
}

#[rstest]
fn react_skips_refresh_in_production(prod: RspackContext) {
    let plugin = with_react(
        WithReactOptions::default(),
        Some(DescriptorIntegration::shared("@rspack/plugin-react-refresh")),
    );
    let config = plugin.apply(json!({}), &prod).expect("with_react succeeds");
    assert!(config.get("plugins").is_none());
    assert_eq!(
        config["module"]["rules"][0]["use"][0]["options"]["jsc"]["transform"]["react"]["refresh"],
        false
    );
}

#[rstest]
fn react_without_refresh_integration_continues(dev: RspackContext) {
    let config = with_react(WithReactOptions::default(), None)
        .apply(json!({}), &dev)
        .expect("with_react succeeds");
    assert!(config.get("plugins").is_none());
    assert_eq!(config["module"]["rules"].as_array().map(Vec::len), Some(1));
}

#[test]
fn compose_plugins_uses_default_context() {
    let chain = compose![
        with_base(WithBaseOptions::default()),
        with_react(WithReactOptions::default(), None),
    ];
    let config = compose_plugins(&chain).expect("chain succeeds");
    assert_eq!(config["mode"], "development");
    assert_eq!(config["module"]["rules"].as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case(Mode::Development, "[name].js")]
#[case(Mode::Production, "[name].[contenthash].js")]
fn base_config_tracks_mode(#[case] mode: Mode, #[case] filename: &str) {
    let config = create_base_config(&Context::new().with_mode(mode));
    assert_eq!(config["output"]["filename"], filename);
    assert_eq!(config["module"]["rules"], json!([]));
    assert_eq!(config["optimization"]["runtimeChunk"], false);
}
