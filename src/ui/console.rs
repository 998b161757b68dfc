use crate::core::models::{ControlsView, MessageKind};
use crate::ui::{MessageSink, PollingView};
use std::sync::Mutex;

pub struct ConsoleUi {
    quiet: bool,
    last_status: Mutex<Option<&'static str>>,
}

impl ConsoleUi {
    /// With `quiet`, transient info and warning messages are dropped.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            last_status: Mutex::new(None),
        }
    }
}

impl MessageSink for ConsoleUi {
    fn show(&self, kind: MessageKind, message: &str) {
        tracing::debug!(kind = kind.label(), message, "Status message");

        if self.quiet && kind.is_transient() {
            return;
        }

        match kind {
            MessageKind::Error => eprintln!("{}", message),
            _ => println!("{}", message),
        }
    }
}

impl PollingView for ConsoleUi {
    fn render(&self, controls: &ControlsView) {
        let mut last = self
            .last_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // The initial idle render is implied; only print changes after it.
        let changed = match *last {
            None => false,
            Some(previous) => previous != controls.status_text,
        };
        *last = Some(controls.status_text);

        if changed {
            let hint = if controls.stop_visible {
                "  (Ctrl-C to stop)"
            } else {
                ""
            };
            println!("{}{}", controls.status_text, hint);
        }
    }
}
