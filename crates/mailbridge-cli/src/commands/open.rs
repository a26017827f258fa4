//! `mailbridge open` -- open a mail application.

use clap::Args;
use mailbridge_types::ComposeRequest;

/// Arguments for `mailbridge open`.
#[derive(Args)]
pub struct OpenArgs {
    /// Recipient address.
    #[arg(long)]
    pub to: Option<String>,

    /// Open this application (exact name) instead of the preferred one.
    #[arg(long)]
    pub app: Option<String>,

    /// Subject line.
    #[arg(long)]
    pub subject: Option<String>,

    /// Message body.
    #[arg(long)]
    pub body: Option<String>,

    /// Carbon-copy recipient (repeatable).
    #[arg(long)]
    pub cc: Vec<String>,

    /// Blind-carbon-copy recipient (repeatable).
    #[arg(long)]
    pub bcc: Vec<String>,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: OpenArgs) -> anyhow::Result<()> {
    let plugin = super::build_plugin(args.config.as_deref()).await?;
    let compose = compose_request(&args);

    let opened = match args.app.as_deref() {
        Some(name) => plugin.open_specific_mail_app(name, &compose).await,
        None => plugin.open_mail_app(&compose).await,
    };
    if !opened {
        anyhow::bail!("no mail application could be opened");
    }
    Ok(())
}

/// Build the compose request from the flags. An empty `--to` means
/// "no recipient", the same normalization the wire boundary applies.
fn compose_request(args: &OpenArgs) -> ComposeRequest {
    let mut compose = ComposeRequest::new();
    compose.to = args.to.clone().filter(|to| !to.is_empty());
    compose.cc = args.cc.clone();
    compose.bcc = args.bcc.clone();
    compose.subject = args.subject.clone();
    compose.body = args.body.clone();
    compose
}
