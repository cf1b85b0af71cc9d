//! `gratia watch`: follow the partner's edits as they land.

use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use gratia_core::keys;
use gratia_infrastructure::FileStorePoller;

use super::context::AppContext;
use super::render;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let session = ctx.active_session().await?;
    let code = session
        .pairing_code
        .clone()
        .context("Session has no pairing code")?;
    let sync_key = keys::sync_key(&code).context("Session has a blank pairing code")?;

    let cancel = CancellationToken::new();
    let poller = FileStorePoller::new(ctx.store.clone(), ctx.hub.clone(), vec![sync_key])
        .spawn(
            Duration::from_millis(ctx.config.storage.poll_interval_ms),
            cancel.clone(),
        );

    render::dashboard(&session, &ctx.usecase.document().await);
    println!("\n{}", "Watching for updates from your partner (Ctrl-C to stop)".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = ctx.usecase.next_remote_update() => match update {
                Some(doc) => {
                    println!("\n{}", "── partner update ──".cyan());
                    render::dashboard(&session, &doc);
                }
                None => {
                    tracing::info!("subscription closed");
                    break;
                }
            },
        }
    }

    cancel.cancel();
    poller.await.context("Poller task failed")?;
    Ok(())
}
