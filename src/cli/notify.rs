use crate::cli::Context;
use anyhow::{Context as _, Result};

pub async fn run(ctx: &Context, email: Option<String>, to: String) -> Result<()> {
    let controller = ctx.controller();
    controller.set_account(ctx.email(email));

    ctx.setup()
        .set_notification_email(&controller, &to)
        .await
        .context("Failed to set notification email")?;

    Ok(())
}
