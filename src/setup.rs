use crate::core::error::PollingError;
use crate::core::form::{ConnectionForm, FormError};
use crate::core::models::{MessageKind, ResponseEnvelope};
use crate::polling::PollingController;
use crate::service::PollingService;
use crate::ui::MessageSink;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Service(#[from] PollingError),
}

/// Submits account configuration and hands a verified account to the controller.
pub struct ConnectionSetup {
    service: Arc<dyn PollingService>,
    messages: Arc<dyn MessageSink>,
}

impl ConnectionSetup {
    pub fn new(service: Arc<dyn PollingService>, messages: Arc<dyn MessageSink>) -> Self {
        Self { service, messages }
    }

    /// Fills server settings for known providers. Returns whether a preset applied.
    pub fn autofill(&self, form: &mut ConnectionForm) -> bool {
        match form.apply_preset() {
            Some(preset) => {
                tracing::debug!(domain = preset.domain, "Applied provider preset");
                self.messages.show(
                    MessageKind::Info,
                    &format!("⚡ Settings filled in automatically for {}", preset.domain),
                );
                true
            }
            None => false,
        }
    }

    pub async fn test_connection(
        &self,
        form: &ConnectionForm,
        controller: &PollingController,
    ) -> Result<ResponseEnvelope, SetupError> {
        if let Err(err) = form.validate() {
            self.messages.show(MessageKind::Error, &err.to_string());
            return Err(err.into());
        }

        self.messages
            .show(MessageKind::Loading, "🔄 Testing connection...");
        tracing::info!(email = %form.email, imap = %form.imap_server, smtp = %form.smtp_server, "Testing connection");

        match self.service.test_connection(form).await {
            Ok(envelope) => {
                self.messages.show(MessageKind::Success, &envelope.message);
                controller.set_account(Some(form.email.clone()));
                if let Some(details) = &envelope.details {
                    self.messages
                        .show(MessageKind::Info, &format!("ℹ️ Details: {}", details));
                }
                Ok(envelope)
            }
            Err(PollingError::ServerRejected { message, details }) => {
                tracing::warn!(email = %form.email, %message, "Connection test rejected");
                self.messages.show(MessageKind::Error, &message);
                if let Some(details) = &details {
                    self.messages
                        .show(MessageKind::Warning, &format!("💡 Tip: {}", details));
                }
                Err(PollingError::ServerRejected { message, details }.into())
            }
            Err(err) => {
                tracing::warn!(email = %form.email, error = %err, "Connection test failed");
                let message = match &err {
                    PollingError::NetworkFault(cause) => format!("❌ Network error: {}", cause),
                    other => format!("❌ {}", other),
                };
                self.messages.show(MessageKind::Error, &message);
                Err(err.into())
            }
        }
    }

    pub async fn set_notification_email(
        &self,
        controller: &PollingController,
        notification_email: &str,
    ) -> Result<ResponseEnvelope, PollingError> {
        let Some(account) = controller.account() else {
            self.messages.show(
                MessageKind::Error,
                "❌ Configure your email settings first",
            );
            return Err(PollingError::ConfigurationMissing);
        };

        match self
            .service
            .set_notification_email(&account, notification_email.trim())
            .await
        {
            Ok(envelope) => {
                self.messages.show(MessageKind::Success, &envelope.message);
                Ok(envelope)
            }
            Err(err) => {
                let message = match &err {
                    PollingError::ServerRejected { message, .. } => message.clone(),
                    other => format!("❌ Failed to set notification email: {}", other),
                };
                self.messages.show(MessageKind::Error, &message);
                Err(err)
            }
        }
    }
}
