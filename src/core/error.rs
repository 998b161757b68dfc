use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollingError {
    #[error("no email account configured")]
    ConfigurationMissing,

    /// A well-formed error envelope; `message` is the server's text, untouched.
    #[error("{message}")]
    ServerRejected {
        message: String,
        details: Option<String>,
    },

    #[error("network error: {0}")]
    NetworkFault(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl PollingError {
    #[allow(dead_code)]
    pub fn rejected(message: impl Into<String>) -> Self {
        PollingError::ServerRejected {
            message: message.into(),
            details: None,
        }
    }

    #[allow(dead_code)]
    pub fn is_network(&self) -> bool {
        matches!(self, PollingError::NetworkFault(_))
    }
}

impl From<reqwest::Error> for PollingError {
    fn from(err: reqwest::Error) -> Self {
        if (err.is_decode() || err.is_body()) && !err.is_timeout() {
            PollingError::MalformedResponse(err.to_string())
        } else {
            PollingError::NetworkFault(err.to_string())
        }
    }
}
