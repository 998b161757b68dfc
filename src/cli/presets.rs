use crate::core::presets::{self, ProviderPreset};
use anyhow::Result;

pub fn run(json: bool, email: Option<String>) -> Result<()> {
    let selected: Vec<&ProviderPreset> = match email.as_deref() {
        Some(email) => {
            let domain = presets::domain_of(email)
                .ok_or_else(|| anyhow::anyhow!("Not an email address: {}", email))?;
            match presets::lookup(domain) {
                Some(preset) => vec![preset],
                None => anyhow::bail!("No preset for {}. Enter the IMAP/SMTP servers manually", domain),
            }
        }
        None => presets::PRESETS.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for preset in selected {
        println!(
            "{:<12} IMAP {}:{:<5} SMTP {}:{}",
            preset.domain,
            preset.imap_server,
            preset.imap_port,
            preset.smtp_server,
            preset.smtp_port
        );
    }

    Ok(())
}
