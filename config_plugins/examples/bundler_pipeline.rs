//! Assemble a Vite configuration from named presets and print it as JSON.
//!
//! Preset names come from the command line, for example
//! `cargo run --example bundler_pipeline -- with-base with-react`. With no
//! arguments every preset runs. `BUNDLE_COMMAND` and `BUNDLE_MODE` choose
//! the Vite environment.

use std::io::{self, Write};

use anyhow::{Context as _, Result, anyhow};
use config_plugins::presets::capability::DescriptorIntegration;
use config_plugins::presets::common::{ProcessEnv, with_env};
use config_plugins::presets::vite::{self, ConfigEnv, ReactIntegrations, ViteContext, WithPwaOptions};
use config_plugins::presets::{WithBaseOptions, WithEnvOptions, WithReactOptions};
use config_plugins::PluginRegistry;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde_json::Value;

const ALL_PRESETS: [&str; 4] = ["with-base", "with-react", "with-pwa", "with-env"];

fn registry() -> PluginRegistry<Value, ViteContext> {
    PluginRegistry::new()
        .with("with-base", vite::with_base(WithBaseOptions::default()))
        .with(
            "with-react",
            vite::with_react(
                WithReactOptions::default(),
                ReactIntegrations::primary(DescriptorIntegration::shared("@vitejs/plugin-react")),
            ),
        )
        .with(
            "with-pwa",
            vite::with_pwa(
                WithPwaOptions::default(),
                Some(DescriptorIntegration::shared("vite-plugin-pwa")),
            ),
        )
        .with("with-env", with_env(WithEnvOptions::default(), ProcessEnv, "define"))
}

fn config_env(figment: &Figment) -> Result<ConfigEnv> {
    figment
        .extract()
        .context("BUNDLE_COMMAND and BUNDLE_MODE must be strings")
}

fn env_figment() -> Figment {
    Figment::from(Serialized::defaults(ConfigEnv::new("serve", "development")))
        .merge(Env::prefixed("BUNDLE_").only(&["command", "mode"]))
}

fn resolve(names: &[String]) -> Result<Value> {
    let chain = registry().resolve(names).build();
    chain.check().map_err(|err| anyhow!("{err}"))?;
    let env = config_env(&env_figment())?;
    vite::compose_plugins(chain)
        .call(&env)
        .map_err(|err| anyhow!("{err}"))
}

fn main() -> Result<()> {
    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = ALL_PRESETS.iter().map(|name| (*name).to_owned()).collect();
    }
    let config = resolve(&names)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
