//! Device registry client bound to one page
//!
//! [`DeviceRegistryClient`] turns user actions into registry calls and
//! patches the [`Page`] with the results. Its four handlers are independent
//! of each other:
//!
//! - [`DeviceRegistryClient::submit_form`] - add a device from the form
//! - [`DeviceRegistryClient::delete_device`] - confirm, delete, reload
//! - [`DeviceRegistryClient::render_devices`] - rebuild the device list
//! - [`DeviceRegistryClient::show_device_details`] - show one record
//!
//! No handler returns an error. Failures end up in front of the user as a
//! notification or a failure view, and in the log; the returned [`Outcome`]
//! says which way it went.

mod add;
mod delete;
mod detail;
mod guard;
mod list;
pub mod messages;

use std::sync::Arc;

use crate::config::Config;
use crate::observability::Metrics;
use crate::page::{Action, Page};
use crate::registry::RegistryApi;
use guard::{InFlight, LatestOnly};

/// How a handler invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted and the page shows the result
    Done,
    /// The user has been told it failed
    Failed,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
    /// The same action was still in flight; nothing was sent
    Busy,
    /// A newer invocation superseded this one; its result was discarded
    Stale,
}

/// Client-side switches
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Refuse form submissions whose IMEI is not exactly 15 digits
    pub strict_imei: bool,
}

impl From<&Config> for ClientOptions {
    fn from(config: &Config) -> Self {
        Self {
            strict_imei: config.form.strict_imei,
        }
    }
}

pub struct DeviceRegistryClient {
    registry: Arc<dyn RegistryApi>,
    page: Page,
    options: ClientOptions,
    metrics: Arc<Metrics>,
    adding: InFlight,
    deleting: InFlight,
    detail_requests: LatestOnly,
}

impl DeviceRegistryClient {
    pub fn new(registry: Arc<dyn RegistryApi>, page: Page, options: ClientOptions) -> Self {
        Self {
            registry,
            page,
            options,
            metrics: Arc::new(Metrics::new()),
            adding: InFlight::default(),
            deleting: InFlight::default(),
            detail_requests: LatestOnly::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run whatever a clicked entry or control is wired to
    pub async fn dispatch(&self, action: &Action) -> Outcome {
        match action {
            Action::ShowDetails(imei) => self.show_device_details(imei).await,
            Action::Delete(imei) => self.delete_device(imei).await,
        }
    }
}
