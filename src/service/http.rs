use crate::core::error::PollingError;
use crate::core::form::ConnectionForm;
use crate::core::models::{PollingStatus, ResponseEnvelope};
use crate::core::settings::ServerSettings;
use crate::service::PollingService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

pub struct HttpPollingService {
    client: Client,
    base_url: Url,
}

impl HttpPollingService {
    pub fn new(settings: &ServerSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid server URL: {}", settings.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Server URL must be an http(s) URL: {}", base_url);
        }

        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post_form(
        &self,
        segment: &str,
        fields: &[(&str, &str)],
    ) -> Result<ResponseEnvelope, PollingError> {
        let url = self.endpoint(&[segment]);
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).form(fields).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PollingError> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| PollingError::MalformedResponse(format!("HTTP {}: {}", status, e)))
}

fn require_success(envelope: ResponseEnvelope) -> Result<ResponseEnvelope, PollingError> {
    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(PollingError::ServerRejected {
            message: envelope.message,
            details: envelope.details,
        })
    }
}

#[async_trait]
impl PollingService for HttpPollingService {
    async fn test_connection(
        &self,
        form: &ConnectionForm,
    ) -> Result<ResponseEnvelope, PollingError> {
        let fields = form.to_fields();
        let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.post_form("test-connection", &fields)
            .await
            .and_then(require_success)
    }

    async fn begin_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError> {
        self.post_form("start-polling", &[("email", email)])
            .await
            .and_then(require_success)
    }

    async fn end_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError> {
        self.post_form("stop-polling", &[("email", email)]).await
    }

    async fn polling_status(&self, email: &str) -> Result<PollingStatus, PollingError> {
        let url = self.endpoint(&["polling-status", email]);
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn set_notification_email(
        &self,
        email: &str,
        notification_email: &str,
    ) -> Result<ResponseEnvelope, PollingError> {
        self.post_form(
            "set-notification-email",
            &[("email", email), ("notification_email", notification_email)],
        )
        .await
        .and_then(require_success)
    }
}
