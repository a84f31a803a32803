use tracing::{debug, error, warn};

use super::{DeviceRegistryClient, Outcome, messages};
use crate::page::{Action, DetailContent};
use crate::registry::{ClientError, Imei};

impl DeviceRegistryClient {
    /// Fetch one device and show it, or show why it could not be shown.
    ///
    /// Exactly one view replaces the previous one per call. When calls
    /// overlap, only the most recent one gets to render.
    pub async fn show_device_details(&self, imei: &Imei) -> Outcome {
        let ticket = self.detail_requests.ticket();
        let result = self.registry.device_details(imei).await;

        if !self.detail_requests.is_current(ticket) {
            debug!(%imei, ticket, "Discarding superseded device details");
            return Outcome::Stale;
        }

        let (content, outcome) = match result {
            Ok(device) => {
                self.metrics.details_loaded();
                let content = DetailContent::Device {
                    heading: messages::detail_heading(imei.as_str()),
                    body: device.to_pretty_json(),
                    delete: Action::Delete(imei.clone()),
                };
                (content, Outcome::Done)
            }
            Err(ClientError::Rejected) => {
                warn!(%imei, "Registry has no details for device");
                self.metrics.detail_failed();
                let content = DetailContent::Message(messages::DETAILS_REJECTED.to_string());
                (content, Outcome::Failed)
            }
            Err(e) => {
                error!(%imei, error = %e, "Loading device details failed");
                self.metrics.detail_failed();
                let content = DetailContent::Message(messages::DETAILS_ERROR.to_string());
                (content, Outcome::Failed)
            }
        };

        self.page.details.replace(content);
        outcome
    }
}
