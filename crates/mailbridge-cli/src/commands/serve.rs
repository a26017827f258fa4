//! `mailbridge serve` -- the stdio method channel.
//!
//! One JSON-encoded method call per line on stdin, exactly one JSON
//! response per line on stdout. A line that is not valid JSON gets a
//! `parse_error` response rather than killing the session. EOF or
//! Ctrl+C shuts the channel down.

use anyhow::Context;
use clap::Args;
use mailbridge_plugin::MethodHandler;
use mailbridge_types::{MethodCall, MethodResponse};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Arguments for `mailbridge serve`.
#[derive(Args)]
pub struct ServeArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let plugin = super::build_plugin(args.config.as_deref()).await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received shutdown signal");
            signal_cancel.cancel();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    info!("method channel ready on stdio");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("method channel shutting down");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading method call")? else {
                    debug!("stdin closed");
                    return Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }
                let response = match serde_json::from_str::<MethodCall>(&line) {
                    Ok(call) => plugin.invoke(call).await,
                    Err(e) => {
                        warn!(error = %e, "unparseable method call");
                        MethodResponse::Error {
                            code: "parse_error".into(),
                            message: e.to_string(),
                        }
                    }
                };
                let mut frame = serde_json::to_vec(&response).context("encoding response")?;
                frame.push(b'\n');
                stdout.write_all(&frame).await.context("writing response")?;
                stdout.flush().await.context("flushing response")?;
            }
        }
    }
}
