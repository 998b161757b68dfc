use crate::cli::Context;
use crate::core::models::PollingStatus;
use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput<'a> {
    account: &'a str,
    #[serde(flatten)]
    status: &'a PollingStatus,
    fetched_at: DateTime<Utc>,
}

pub async fn run(ctx: &Context, email: Option<String>, json: bool) -> Result<()> {
    let email = ctx.require_email(email)?;

    let status = ctx
        .service()
        .polling_status(&email)
        .await
        .with_context(|| format!("Failed to fetch polling status for {}", email))?;

    if json {
        let output = StatusOutput {
            account: &email,
            status: &status,
            fetched_at: Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_output(&email, &status);
    }

    Ok(())
}

fn print_text_output(email: &str, status: &PollingStatus) {
    println!("{}", email);

    if let Some(configured) = status.configured {
        println!("  {:<12} {}", "Configured:", yes_no(configured));
    }
    println!(
        "  {:<12} {}",
        "Polling:",
        if status.polling { "active" } else { "stopped" }
    );
    if let Some(state) = &status.status {
        println!("  {:<12} {}", "Status:", state);
    }
    if !status.allowed_senders.is_empty() {
        println!("  {:<12} {}", "Senders:", status.allowed_senders.join(", "));
    }
    if let Some(message) = &status.message {
        println!("  {}", message);
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
