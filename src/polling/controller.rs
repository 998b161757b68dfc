use crate::core::error::PollingError;
use crate::core::models::{ControlsView, MessageKind, SessionState};
use crate::service::PollingService;
use crate::ui::{MessageSink, PollingView};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Default)]
struct Session {
    account: Option<String>,
    state: SessionState,
    /// Bumped by every start, stop and account change; late results from older
    /// generations are dropped.
    generation: u64,
    reconciliation: Option<JoinHandle<()>>,
}

impl Session {
    fn cancel_reconciliation(&mut self) {
        if let Some(handle) = self.reconciliation.take() {
            handle.abort();
        }
    }

    fn supersede(&mut self) -> u64 {
        self.cancel_reconciliation();
        self.generation += 1;
        self.generation
    }

    fn owns(&self, generation: u64, account: &str) -> bool {
        self.generation == generation && self.account.as_deref() == Some(account)
    }

    fn is_live(&self, generation: u64, account: &str) -> bool {
        self.owns(generation, account) && self.state.is_active()
    }
}

struct Shared {
    session: Mutex<Session>,
    service: Arc<dyn PollingService>,
    messages: Arc<dyn MessageSink>,
    view: Arc<dyn PollingView>,
    state_tx: watch::Sender<SessionState>,
    interval: Duration,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Sole writer of `state`: renders and publishes in the same step.
    fn transition(&self, session: &mut Session, state: SessionState) {
        session.state = state;
        self.view.render(&ControlsView::for_state(state));
        self.state_tx.send_replace(state);
    }

    // Cancel-before-schedule: at most one task per controller.
    fn schedule_reconciliation(
        self: &Arc<Self>,
        session: &mut Session,
        account: &str,
        generation: u64,
    ) {
        session.cancel_reconciliation();
        session.reconciliation = Some(tokio::spawn(reconcile(
            Arc::clone(self),
            account.to_string(),
            generation,
        )));
    }

    fn report_start_failure(&self, err: &PollingError) {
        match err {
            PollingError::ServerRejected { message, details } => {
                self.messages.show(MessageKind::Error, message);
                if let Some(details) = details {
                    self.messages
                        .show(MessageKind::Info, &format!("ℹ️ {}", details));
                }
            }
            PollingError::NetworkFault(cause) => self.messages.show(
                MessageKind::Error,
                &format!("❌ Network error while starting polling: {}", cause),
            ),
            PollingError::MalformedResponse(cause) => self.messages.show(
                MessageKind::Error,
                &format!("❌ Unexpected response while starting polling: {}", cause),
            ),
            PollingError::ConfigurationMissing => self
                .messages
                .show(MessageKind::Error, "❌ No email account configured"),
        }
    }
}

/// Owns one monitoring session: the account slot, the session state and the
/// recurring status check that keeps the state honest.
pub struct PollingController {
    shared: Arc<Shared>,
}

impl PollingController {
    pub fn new(
        service: Arc<dyn PollingService>,
        messages: Arc<dyn MessageSink>,
        view: Arc<dyn PollingView>,
        interval: Duration,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        view.render(&ControlsView::for_state(SessionState::Idle));

        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(Session::default()),
                service,
                messages,
                view,
                state_tx,
                interval,
            }),
        }
    }

    /// Sets or clears the account. Switching accounts tears down the current
    /// session locally without telling the server.
    pub fn set_account(&self, account: Option<String>) {
        let account = account
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let mut session = self.shared.lock();
        if session.account == account {
            return;
        }

        tracing::info!(account = ?account, "Account changed");
        session.account = account;
        session.supersede();
        if session.state != SessionState::Idle {
            self.shared.transition(&mut session, SessionState::Idle);
        }
    }

    pub fn account(&self) -> Option<String> {
        self.shared.lock().account.clone()
    }

    #[allow(dead_code)]
    pub fn state(&self) -> SessionState {
        self.shared.lock().state
    }

    #[allow(dead_code)]
    pub fn controls(&self) -> ControlsView {
        ControlsView::for_state(self.state())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state_tx.subscribe()
    }

    #[allow(dead_code)]
    pub fn reconciliation_active(&self) -> bool {
        self.shared
            .lock()
            .reconciliation
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn start(&self) -> Result<(), PollingError> {
        let (account, generation, previous) = {
            let mut session = self.shared.lock();
            let Some(account) = session.account.clone() else {
                drop(session);
                self.shared
                    .report_start_failure(&PollingError::ConfigurationMissing);
                return Err(PollingError::ConfigurationMissing);
            };
            let previous = session.state;
            let generation = session.supersede();
            self.shared.transition(&mut session, SessionState::Starting);
            (account, generation, previous)
        };

        tracing::info!(%account, generation, "Starting polling");
        let result = self.shared.service.begin_monitoring(&account).await;

        let mut session = self.shared.lock();
        if !session.owns(generation, &account) {
            tracing::debug!(%account, generation, "Start response superseded, ignoring");
            return result.map(|_| ());
        }

        match result {
            Ok(envelope) => {
                self.shared.transition(&mut session, SessionState::Active);
                self.shared
                    .schedule_reconciliation(&mut session, &account, generation);
                drop(session);

                tracing::info!(%account, "Polling active");
                self.shared
                    .messages
                    .show(MessageKind::Success, &envelope.message);
                if let Some(details) = &envelope.details {
                    self.shared
                        .messages
                        .show(MessageKind::Info, &format!("ℹ️ {}", details));
                }
                Ok(())
            }
            Err(err) => {
                // A refused restart leaves the running session in place.
                if previous.is_active() {
                    self.shared.transition(&mut session, SessionState::Active);
                    self.shared
                        .schedule_reconciliation(&mut session, &account, generation);
                } else {
                    self.shared.transition(&mut session, SessionState::Idle);
                }
                drop(session);

                tracing::warn!(%account, error = %err, "Failed to start polling");
                self.shared.report_start_failure(&err);
                Err(err)
            }
        }
    }

    /// Local state goes idle before the server is asked; a failed request is
    /// reported but never brings the session back.
    pub async fn stop(&self) -> Result<(), PollingError> {
        let account = {
            let mut session = self.shared.lock();
            if session.state == SessionState::Idle {
                return Ok(());
            }
            session.supersede();
            self.shared.transition(&mut session, SessionState::Idle);
            session.account.clone()
        };

        let Some(account) = account else {
            return Ok(());
        };

        tracing::info!(%account, "Stopping polling");
        match self.shared.service.end_monitoring(&account).await {
            Ok(envelope) => {
                let kind = if envelope.is_success() {
                    MessageKind::Info
                } else {
                    MessageKind::Warning
                };
                self.shared.messages.show(kind, &envelope.message);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%account, error = %err, "Stop request failed");
                let message = match &err {
                    PollingError::ServerRejected { message, .. } => message.clone(),
                    other => format!("❌ Error while stopping polling: {}", other),
                };
                self.shared.messages.show(MessageKind::Error, &message);
                Err(err)
            }
        }
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.shared.lock().cancel_reconciliation();
    }
}

async fn reconcile(shared: Arc<Shared>, account: String, generation: u64) {
    let period = shared.interval;
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let live = shared.lock().is_live(generation, &account);
        if !live {
            tracing::debug!(%account, generation, "Reconciliation no longer current");
            break;
        }

        match shared.service.polling_status(&account).await {
            Ok(status) if status.polling => {
                tracing::trace!(%account, "Polling still active on server");
            }
            Ok(_) => {
                let mut session = shared.lock();
                if session.is_live(generation, &account) {
                    session.reconciliation = None;
                    shared.transition(&mut session, SessionState::Idle);
                    tracing::info!(%account, "Polling stopped on server");
                }
                break;
            }
            Err(err) => {
                tracing::warn!(%account, error = %err, "Status check failed, retrying next interval");
            }
        }
    }
}
