use tracing::{debug, error, info, warn};

use super::{DeviceRegistryClient, Outcome, messages};
use crate::registry::Imei;

impl DeviceRegistryClient {
    /// Delete a device after the user confirms.
    ///
    /// Declining sends nothing. On success the whole page is reloaded rather
    /// than patched.
    pub async fn delete_device(&self, imei: &Imei) -> Outcome {
        let Some(_in_flight) = self.deleting.try_acquire() else {
            debug!(%imei, "Deletion already in flight, ignoring");
            self.metrics.request_refused();
            return Outcome::Busy;
        };

        if !self.page.notifier.confirm(messages::DELETE_CONFIRM) {
            debug!(%imei, "Deletion cancelled");
            return Outcome::Cancelled;
        }

        match self.registry.delete_device(imei).await {
            Ok(()) => {
                info!(%imei, "Device deleted");
                self.metrics.device_deleted();
                self.page.notifier.alert(messages::DELETE_SUCCEEDED);
                self.page.navigator.reload();
                Outcome::Done
            }
            Err(e) if e.is_rejection() => {
                warn!(%imei, error = %e, "Registry refused deletion");
                self.metrics.delete_failed();
                self.page.notifier.alert(messages::DELETE_REJECTED);
                Outcome::Failed
            }
            Err(e) => {
                error!(%imei, error = %e, "Deleting device failed");
                self.metrics.delete_failed();
                self.page.notifier.alert(messages::DELETE_ERROR);
                Outcome::Failed
            }
        }
    }
}
