use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderPreset {
    pub domain: &'static str,
    pub imap_server: &'static str,
    pub imap_port: u16,
    pub smtp_server: &'static str,
    pub smtp_port: u16,
}

const fn preset(
    domain: &'static str,
    imap_server: &'static str,
    smtp_server: &'static str,
) -> ProviderPreset {
    ProviderPreset {
        domain,
        imap_server,
        imap_port: 993,
        smtp_server,
        smtp_port: 587,
    }
}

pub const PRESETS: &[ProviderPreset] = &[
    preset("gmail.com", "imap.gmail.com", "smtp.gmail.com"),
    preset("outlook.com", "outlook.office365.com", "smtp-mail.outlook.com"),
    preset("hotmail.com", "outlook.office365.com", "smtp-mail.outlook.com"),
    preset("yahoo.com", "imap.mail.yahoo.com", "smtp.mail.yahoo.com"),
    preset("zohomail.eu", "imap.zoho.eu", "smtp.zoho.eu"),
    preset("zoho.com", "imap.zoho.com", "smtp.zoho.com"),
];

/// Domain part of an address, if there is a non-empty one.
pub fn domain_of(email: &str) -> Option<&str> {
    email
        .split_once('@')
        .map(|(_, domain)| domain.trim())
        .filter(|domain| !domain.is_empty())
}

pub fn lookup(domain: &str) -> Option<&'static ProviderPreset> {
    PRESETS
        .iter()
        .find(|p| p.domain.eq_ignore_ascii_case(domain))
}

pub fn for_email(email: &str) -> Option<&'static ProviderPreset> {
    domain_of(email).and_then(lookup)
}
