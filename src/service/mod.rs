mod http;

#[cfg(test)]
pub(crate) mod fake;

use crate::core::error::PollingError;
use crate::core::form::ConnectionForm;
use crate::core::models::{PollingStatus, ResponseEnvelope};
use async_trait::async_trait;

pub use http::HttpPollingService;

/// The remote side of mailbox polling. Implementations never retry; callers decide.
#[async_trait]
pub trait PollingService: Send + Sync {
    /// Checks IMAP and SMTP credentials; on success the server remembers the account.
    async fn test_connection(&self, form: &ConnectionForm)
        -> Result<ResponseEnvelope, PollingError>;

    /// Only a `status: "success"` envelope is `Ok`.
    async fn begin_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError>;

    /// Returns whatever envelope the server sent, including warnings.
    async fn end_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError>;

    async fn polling_status(&self, email: &str) -> Result<PollingStatus, PollingError>;

    async fn set_notification_email(
        &self,
        email: &str,
        notification_email: &str,
    ) -> Result<ResponseEnvelope, PollingError>;
}
