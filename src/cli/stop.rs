use crate::cli::Context;
use anyhow::{Context as _, Result};

/// Stops polling on the server without a local session; an attached client
/// notices on its next status check.
pub async fn run(ctx: &Context, email: Option<String>) -> Result<()> {
    let email = ctx.require_email(email)?;

    let envelope = ctx
        .service()
        .end_monitoring(&email)
        .await
        .with_context(|| format!("Failed to stop polling for {}", email))?;

    if envelope.is_success() {
        println!("{}", envelope.message);
    } else {
        eprintln!("{}", envelope.message);
    }
    if let Some(details) = envelope.details {
        println!("ℹ️ {}", details);
    }

    Ok(())
}
