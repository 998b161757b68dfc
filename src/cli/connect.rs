use crate::cli::{start, Context};
use crate::core::form::{parse_senders, ConnectionForm};
use crate::setup::ConnectionSetup;
use anyhow::{Context as _, Result};
use clap::Args;

const PASSWORD_ENV: &str = "MAILPOLL_PASSWORD";

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Mailbox address to monitor
    #[arg(long)]
    pub email: Option<String>,

    /// Mailbox password (or set MAILPOLL_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,

    /// IMAP server; filled from the provider preset when omitted
    #[arg(long)]
    pub imap_server: Option<String>,

    #[arg(long)]
    pub imap_port: Option<u16>,

    /// SMTP server; filled from the provider preset when omitted
    #[arg(long)]
    pub smtp_server: Option<String>,

    #[arg(long)]
    pub smtp_port: Option<u16>,

    /// Comma-separated senders whose mail gets processed
    #[arg(long)]
    pub allowed_senders: Option<String>,

    /// API key for OCR; OCR is disabled without it
    #[arg(long)]
    pub openrouter_api_key: Option<String>,

    /// Where OCR results are sent
    #[arg(long)]
    pub notification_email: Option<String>,
}

pub async fn run(ctx: &Context, args: ConnectionArgs, then_start: bool) -> Result<()> {
    let setup = ctx.setup();
    let form = build_form(ctx, &setup, args);

    let controller = ctx.controller();
    setup
        .test_connection(&form, &controller)
        .await
        .context("Connection test failed")?;

    if then_start {
        controller.start().await.context("Failed to start polling")?;
        start::attach(&controller).await?;
    }

    Ok(())
}

fn build_form(ctx: &Context, setup: &ConnectionSetup, args: ConnectionArgs) -> ConnectionForm {
    let account = &ctx.settings.account;

    let mut form = ConnectionForm {
        email: ctx.email(args.email).unwrap_or_default(),
        password: args
            .password
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
            .unwrap_or_default(),
        ..Default::default()
    };

    setup.autofill(&mut form);

    if let Some(server) = args.imap_server {
        form.imap_server = server;
    }
    if let Some(port) = args.imap_port {
        form.imap_port = port;
    }
    if let Some(server) = args.smtp_server {
        form.smtp_server = server;
    }
    if let Some(port) = args.smtp_port {
        form.smtp_port = port;
    }

    form.allowed_senders = match args.allowed_senders {
        Some(raw) => parse_senders(&raw),
        None => account.allowed_senders.clone(),
    };
    form.openrouter_api_key = args.openrouter_api_key.filter(|k| !k.trim().is_empty());
    form.notification_email = args
        .notification_email
        .or_else(|| account.notification_email.clone())
        .filter(|e| !e.trim().is_empty());

    form
}
