mod controller;

use std::time::Duration;

pub use controller::PollingController;

pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(10);
