//! Subcommand implementations.

pub mod apps;
pub mod open;
pub mod serve;

use anyhow::Context;
use mailbridge_platform::{FreedesktopRegistry, NativeEnvironment, config_loader};
use mailbridge_plugin::MailAppPlugin;
use mailbridge_types::BridgeConfig;

/// Load configuration and build the dispatcher every subcommand runs on.
pub async fn build_plugin(
    config_path: Option<&str>,
) -> anyhow::Result<MailAppPlugin<FreedesktopRegistry>> {
    let config = load_config(config_path).await?;
    let registry = FreedesktopRegistry::new(config.registry.clone());
    Ok(MailAppPlugin::with_config(registry, &config))
}

/// Resolve the config: an explicit path wins over auto-discovery.
async fn load_config(path: Option<&str>) -> anyhow::Result<BridgeConfig> {
    match path {
        Some(path) => config_loader::load_config_from(std::path::Path::new(path))
            .await
            .with_context(|| format!("loading config from {path}")),
        None => config_loader::load_config(&NativeEnvironment)
            .await
            .context("loading config"),
    }
}
