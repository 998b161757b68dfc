use crate::core::models::{ControlsView, MessageKind};
use crate::ui::{MessageSink, PollingView};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(MessageKind, String)>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, kind: MessageKind, message: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|(k, m)| *k == kind && m == message)
    }

    pub fn last(&self) -> Option<(MessageKind, String)> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl MessageSink for RecordingSink {
    fn show(&self, kind: MessageKind, message: &str) {
        self.messages.lock().unwrap().push((kind, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingView {
    renders: Mutex<Vec<ControlsView>>,
}

impl RecordingView {
    pub fn last(&self) -> Option<ControlsView> {
        self.renders.lock().unwrap().last().cloned()
    }

    pub fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }
}

impl PollingView for RecordingView {
    fn render(&self, controls: &ControlsView) {
        self.renders.lock().unwrap().push(controls.clone());
    }
}
