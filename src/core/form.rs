use crate::core::presets::{self, ProviderPreset};
use thiserror::Error;

pub const DEFAULT_IMAP_PORT: u16 = 993;
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("❌ Email and password are required")]
    MissingCredentials,

    #[error("❌ Enter a valid email address")]
    InvalidEmail,

    #[error("❌ {field} must be between 1 and 65535")]
    InvalidPort { field: &'static str },

    #[error("❌ {field} is required")]
    MissingServer { field: &'static str },

    #[error("❌ At least one allowed sender is required")]
    NoAllowedSenders,
}

/// Everything the connection test endpoint takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionForm {
    pub email: String,
    pub password: String,
    pub imap_server: String,
    pub imap_port: u16,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub allowed_senders: Vec<String>,
    pub openrouter_api_key: Option<String>,
    pub notification_email: Option<String>,
}

impl Default for ConnectionForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            imap_server: String::new(),
            imap_port: DEFAULT_IMAP_PORT,
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            allowed_senders: Vec::new(),
            openrouter_api_key: None,
            notification_email: None,
        }
    }
}

impl ConnectionForm {
    /// Fills server fields from the provider table when the email domain is known.
    pub fn apply_preset(&mut self) -> Option<&'static ProviderPreset> {
        let preset = presets::for_email(&self.email)?;
        self.imap_server = preset.imap_server.to_string();
        self.imap_port = preset.imap_port;
        self.smtp_server = preset.smtp_server.to_string();
        self.smtp_port = preset.smtp_port;
        Some(preset)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        if !self.email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        if self.imap_server.trim().is_empty() {
            return Err(FormError::MissingServer {
                field: "IMAP server",
            });
        }
        if self.smtp_server.trim().is_empty() {
            return Err(FormError::MissingServer {
                field: "SMTP server",
            });
        }
        if self.imap_port == 0 {
            return Err(FormError::InvalidPort { field: "IMAP port" });
        }
        if self.smtp_port == 0 {
            return Err(FormError::InvalidPort { field: "SMTP port" });
        }
        if self.allowed_senders.iter().all(|s| s.trim().is_empty()) {
            return Err(FormError::NoAllowedSenders);
        }
        Ok(())
    }

    /// Form-encoded fields in the shape the backend expects.
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        let senders = self
            .allowed_senders
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("email", self.email.trim().to_string()),
            ("password", self.password.clone()),
            ("imap_server", self.imap_server.trim().to_string()),
            ("imap_port", self.imap_port.to_string()),
            ("smtp_server", self.smtp_server.trim().to_string()),
            ("smtp_port", self.smtp_port.to_string()),
            ("allowed_senders", senders),
            (
                "openrouter_api_key",
                self.openrouter_api_key.clone().unwrap_or_default(),
            ),
            (
                "notification_email",
                self.notification_email.clone().unwrap_or_default(),
            ),
        ]
    }
}

/// Splits a comma-separated sender list, dropping blanks.
pub fn parse_senders(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
