use serde::{Deserialize, Serialize};

/// The `{status, message, details?}` envelope every form endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body of `GET /polling-status/{email}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingStatus {
    pub polling: bool,
    #[serde(default)]
    pub configured: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub allowed_senders: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
    Info,
    Warning,
    Loading,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
            MessageKind::Loading => "loading",
        }
    }

    /// Info and warning messages are advisory; quiet output drops them.
    pub fn is_transient(&self) -> bool {
        matches!(self, MessageKind::Info | MessageKind::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    /// Begin-monitoring has been sent and its response has not landed yet.
    Starting,
    Active,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }
}

/// What the polling controls look like for a given session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    #[allow(dead_code)]
    pub start_visible: bool,
    pub stop_visible: bool,
    pub status_text: &'static str,
}

impl ControlsView {
    pub fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self {
                start_visible: true,
                stop_visible: false,
                status_text: "⚪ Polling stopped",
            },
            SessionState::Starting => Self {
                start_visible: false,
                stop_visible: true,
                status_text: "🟡 Starting polling...",
            },
            SessionState::Active => Self {
                start_visible: false,
                stop_visible: true,
                status_text: "🟢 Polling active - monitoring inbox...",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_requires_exact_status() {
        let ok: ResponseEnvelope =
            serde_json::from_str(r#"{"status":"success","message":"ok"}"#).unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.details, None);

        let warning: ResponseEnvelope = serde_json::from_str(
            r#"{"status":"warning","message":"already active","details":"x"}"#,
        )
        .unwrap();
        assert!(!warning.is_success());
        assert_eq!(warning.details.as_deref(), Some("x"));
    }

    #[test]
    fn test_envelope_without_message_is_rejected() {
        let parsed = serde_json::from_str::<ResponseEnvelope>(r#"{"status":"success"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_polling_status_minimal_body() {
        let status: PollingStatus = serde_json::from_str(r#"{"polling":false}"#).unwrap();
        assert!(!status.polling);
        assert!(status.allowed_senders.is_empty());
        assert_eq!(status.configured, None);
    }

    #[test]
    fn test_controls_follow_state() {
        let idle = ControlsView::for_state(SessionState::Idle);
        assert!(idle.start_visible);
        assert!(!idle.stop_visible);

        let active = ControlsView::for_state(SessionState::Active);
        assert!(!active.start_visible);
        assert!(active.stop_visible);

        let starting = ControlsView::for_state(SessionState::Starting);
        assert!(!starting.start_visible);
        assert!(starting.stop_visible);
    }

    #[test]
    fn test_transient_kinds() {
        assert!(MessageKind::Info.is_transient());
        assert!(MessageKind::Warning.is_transient());
        assert!(!MessageKind::Error.is_transient());
        assert!(!MessageKind::Success.is_transient());
        assert!(!MessageKind::Loading.is_transient());
    }
}
