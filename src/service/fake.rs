use crate::core::error::PollingError;
use crate::core::form::ConnectionForm;
use crate::core::models::{PollingStatus, ResponseEnvelope};
use crate::service::PollingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    TestConnection(String),
    Begin(String),
    End(String),
    Status(String),
    Notification(String, String),
}

type Scripted<T> = Mutex<VecDeque<Result<T, PollingError>>>;

/// Scripted in-memory service. Unscripted calls succeed, and status reports `polling: true`.
#[derive(Default)]
pub struct FakeService {
    calls: Mutex<Vec<Call>>,
    connection: Scripted<ResponseEnvelope>,
    begin: Scripted<ResponseEnvelope>,
    end: Scripted<ResponseEnvelope>,
    status: Scripted<PollingStatus>,
    begin_gate: Option<Arc<Notify>>,
    status_gate: Option<Arc<Notify>>,
}

pub fn envelope(status: &str, message: &str) -> ResponseEnvelope {
    ResponseEnvelope {
        status: status.to_string(),
        message: message.to_string(),
        details: None,
    }
}

pub fn polling(active: bool) -> PollingStatus {
    PollingStatus {
        polling: active,
        configured: Some(true),
        status: None,
        allowed_senders: Vec::new(),
        message: None,
    }
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin-monitoring waits for the gate before answering.
    pub fn with_begin_gate(mut self, gate: Arc<Notify>) -> Self {
        self.begin_gate = Some(gate);
        self
    }

    pub fn with_status_gate(mut self, gate: Arc<Notify>) -> Self {
        self.status_gate = Some(gate);
        self
    }

    pub fn script_connection(&self, result: Result<ResponseEnvelope, PollingError>) {
        self.connection.lock().unwrap().push_back(result);
    }

    pub fn script_begin(&self, result: Result<ResponseEnvelope, PollingError>) {
        self.begin.lock().unwrap().push_back(result);
    }

    pub fn script_end(&self, result: Result<ResponseEnvelope, PollingError>) {
        self.end.lock().unwrap().push_back(result);
    }

    pub fn script_status(&self, result: Result<PollingStatus, PollingError>) {
        self.status.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn status_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Status(_)))
    }

    pub fn network_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Scripted<T>, default: impl FnOnce() -> T) -> Result<T, PollingError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| Ok(default()))
}

#[async_trait]
impl PollingService for FakeService {
    async fn test_connection(
        &self,
        form: &ConnectionForm,
    ) -> Result<ResponseEnvelope, PollingError> {
        self.record(Call::TestConnection(form.email.clone()));
        next(&self.connection, || envelope("success", "connected"))
    }

    async fn begin_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError> {
        self.record(Call::Begin(email.to_string()));
        if let Some(gate) = &self.begin_gate {
            gate.notified().await;
        }
        next(&self.begin, || envelope("success", "started"))
    }

    async fn end_monitoring(&self, email: &str) -> Result<ResponseEnvelope, PollingError> {
        self.record(Call::End(email.to_string()));
        next(&self.end, || envelope("success", "stopped"))
    }

    async fn polling_status(&self, email: &str) -> Result<PollingStatus, PollingError> {
        self.record(Call::Status(email.to_string()));
        if let Some(gate) = &self.status_gate {
            gate.notified().await;
        }
        next(&self.status, || polling(true))
    }

    async fn set_notification_email(
        &self,
        email: &str,
        notification_email: &str,
    ) -> Result<ResponseEnvelope, PollingError> {
        self.record(Call::Notification(
            email.to_string(),
            notification_email.to_string(),
        ));
        Ok(envelope("success", "notification address set"))
    }
}
