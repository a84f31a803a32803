use tracing::{error, info, warn};

use super::{DeviceRegistryClient, Outcome, messages};
use crate::page::{Action, ListEntry};
use crate::registry::Device;

impl DeviceRegistryClient {
    /// Replace the list with one entry per device, in the order given.
    ///
    /// The container is always cleared first, so rendering the same list
    /// twice gives the same result and an empty list empties it.
    pub fn render_devices(&self, devices: &[Device]) {
        let list = self.page.list.as_ref();
        list.clear();

        for device in devices {
            list.append(ListEntry {
                label: device.imei().to_string(),
                on_click: Action::ShowDetails(device.imei().clone()),
            });
        }
    }

    /// Fetch every device and render the list. On failure the list keeps
    /// whatever it showed before.
    pub async fn refresh_list(&self) -> Outcome {
        match self.registry.list_devices().await {
            Ok(devices) => {
                info!(count = devices.len(), "Device list loaded");
                self.metrics.list_loaded();
                self.render_devices(&devices);
                Outcome::Done
            }
            Err(e) if e.is_rejection() => {
                warn!(error = %e, "Registry refused device list");
                self.page.notifier.alert(messages::LIST_REJECTED);
                Outcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Loading device list failed");
                self.page.notifier.alert(messages::LIST_ERROR);
                Outcome::Failed
            }
        }
    }
}
