use crate::cli::Context;
use crate::core::models::SessionState;
use crate::polling::PollingController;
use anyhow::{Context as _, Result};

pub async fn run(ctx: &Context, email: Option<String>, detach: bool) -> Result<()> {
    let controller = ctx.controller();
    controller.set_account(ctx.email(email));
    controller.start().await.context("Failed to start polling")?;

    if detach {
        tracing::info!("Detached; polling keeps running on the server");
        return Ok(());
    }

    attach(&controller).await
}

/// Blocks until Ctrl-C (which stops polling) or until the server reports the
/// session gone.
pub async fn attach(controller: &PollingController) -> Result<()> {
    let mut state_rx = controller.subscribe();

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted, stopping polling");
            controller
                .stop()
                .await
                .context("Stop request failed; polling was stopped locally only")?;
        }
        stopped = state_rx.wait_for(|state| *state == SessionState::Idle) => {
            stopped.context("Polling session closed unexpectedly")?;
            println!("Polling is no longer active on the server");
        }
    }

    Ok(())
}
