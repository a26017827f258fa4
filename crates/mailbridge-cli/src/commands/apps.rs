//! `mailbridge apps` -- list installed mail applications.

use clap::Args;

/// Arguments for `mailbridge apps`.
#[derive(Args)]
pub struct AppsArgs {
    /// Emit the list as JSON instead of plain lines.
    #[arg(long)]
    pub json: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: AppsArgs) -> anyhow::Result<()> {
    let plugin = super::build_plugin(args.config.as_deref()).await?;
    let apps = plugin.list_mail_apps().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&apps)?);
        return Ok(());
    }
    if apps.is_empty() {
        println!("no mail applications installed");
        return Ok(());
    }
    for app in apps {
        println!("{}", app.name);
    }
    Ok(())
}
