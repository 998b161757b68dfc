pub mod connect;
pub mod notify;
pub mod presets;
pub mod start;
pub mod status;
pub mod stop;

use crate::core::settings::Settings;
use crate::polling::PollingController;
use crate::service::{HttpPollingService, PollingService};
use crate::setup::ConnectionSetup;
use crate::ui::ConsoleUi;
use anyhow::Result;
use std::sync::Arc;

/// What every subcommand needs: settings, the remote service and the console.
pub struct Context {
    pub settings: Settings,
    service: Arc<dyn PollingService>,
    ui: Arc<ConsoleUi>,
}

impl Context {
    pub fn new(settings: Settings, quiet: bool) -> Result<Self> {
        let service = Arc::new(HttpPollingService::new(&settings.server)?);
        Ok(Self {
            settings,
            service,
            ui: Arc::new(ConsoleUi::new(quiet)),
        })
    }

    pub fn service(&self) -> &dyn PollingService {
        self.service.as_ref()
    }

    pub fn controller(&self) -> PollingController {
        PollingController::new(
            Arc::clone(&self.service),
            self.ui.clone(),
            self.ui.clone(),
            self.settings.polling.reconcile_interval(),
        )
    }

    pub fn setup(&self) -> ConnectionSetup {
        ConnectionSetup::new(Arc::clone(&self.service), self.ui.clone())
    }

    /// The `--email` flag wins over `account.email` from the config file.
    pub fn email(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.settings.account.email.clone())
    }

    pub fn require_email(&self, flag: Option<String>) -> Result<String> {
        self.email(flag)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("No email given. Pass --email or set account.email in the config file")
            })
    }
}
