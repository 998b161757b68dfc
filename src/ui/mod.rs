mod console;

#[cfg(test)]
pub(crate) mod recording;

use crate::core::models::{ControlsView, MessageKind};

pub use console::ConsoleUi;

/// Where user-facing status messages go.
pub trait MessageSink: Send + Sync {
    fn show(&self, kind: MessageKind, message: &str);
}

/// Renders the start/stop controls for the current session state.
pub trait PollingView: Send + Sync {
    fn render(&self, controls: &ControlsView);
}
