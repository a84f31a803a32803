use tracing::{debug, error, info, warn};

use super::{DeviceRegistryClient, Outcome, messages};
use crate::page::DeviceForm;
use crate::registry::{ClientError, FormFields, Imei};

/// Keeps the form disabled for as long as it lives
struct DisabledForm<'a>(&'a dyn DeviceForm);

impl<'a> DisabledForm<'a> {
    fn new(form: &'a dyn DeviceForm) -> Self {
        form.set_enabled(false);
        Self(form)
    }
}

impl Drop for DisabledForm<'_> {
    fn drop(&mut self) {
        self.0.set_enabled(true);
    }
}

impl DeviceRegistryClient {
    /// Handle a submission of the add-device form.
    ///
    /// Posts every form field to the form's action. On success the list is
    /// rebuilt from the server's answer and the form is cleared; on any
    /// failure the form keeps what the user typed.
    pub async fn submit_form(&self) -> Outcome {
        let Some(_in_flight) = self.adding.try_acquire() else {
            debug!("Form submission already in flight, ignoring");
            self.metrics.request_refused();
            return Outcome::Busy;
        };

        let form = self.page.form.as_ref();
        let fields = form.fields();

        if let Err(e) = self.check_imei(&fields) {
            warn!(error = %e, "Form refused before submission");
            if let ClientError::InvalidImei(reason) = &e {
                self.page.notifier.alert(reason);
            }
            self.metrics.add_failed();
            return Outcome::Failed;
        }

        let action = form.action();
        let result = {
            let _disabled = DisabledForm::new(form);
            self.registry.add_device(&action, &fields).await
        };

        match result {
            Ok(devices) => {
                info!(count = devices.len(), "Device added");
                self.metrics.device_added();
                self.page.notifier.alert(messages::ADD_SUCCEEDED);
                self.render_devices(&devices);
                form.reset();
                Outcome::Done
            }
            Err(ClientError::Rejected) => {
                warn!(%action, "Registry rejected new device");
                self.metrics.add_failed();
                self.page.notifier.alert(messages::ADD_REJECTED);
                Outcome::Failed
            }
            Err(e) => {
                error!(%action, error = %e, "Adding device failed");
                self.metrics.add_failed();
                self.page.notifier.alert(messages::ADD_ERROR);
                Outcome::Failed
            }
        }
    }

    fn check_imei(&self, fields: &FormFields) -> Result<Imei, ClientError> {
        let value = fields
            .iter()
            .find(|(name, _)| name == "imei")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();

        if self.options.strict_imei {
            Imei::parse_strict(value)
        } else {
            Imei::new(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::super::testing::{StubRegistry, device};
    use super::super::{ClientOptions, DeviceRegistryClient, Outcome, messages};
    use crate::page::{MemoryPage, Page};
    use crate::registry::ClientError;

    fn client(
        registry: StubRegistry,
        options: ClientOptions,
    ) -> (DeviceRegistryClient, Arc<StubRegistry>, Arc<MemoryPage>) {
        let registry = Arc::new(registry);
        let page = Arc::new(MemoryPage::new("/add_device"));
        page.fill(&[("imei", "351234567890123"), ("device_tag", "roof")]);
        let client =
            DeviceRegistryClient::new(registry.clone(), Page::from_single(page.clone()), options);
        (client, registry, page)
    }

    #[tokio::test]
    async fn test_success_renders_and_resets() {
        let (client, registry, page) = client(
            StubRegistry::adding(Ok(vec![device("351234567890123"), device("42")])),
            ClientOptions::default(),
        );

        assert_eq!(client.submit_form().await, Outcome::Done);

        let state = page.snapshot();
        assert_eq!(state.alerts, vec![messages::ADD_SUCCEEDED.to_string()]);
        assert_eq!(page.labels(), vec!["351234567890123", "42"]);
        assert!(state.fields.iter().all(|(_, value)| value.is_empty()));
        assert_eq!(state.enabled_changes, vec![false, true]);
        assert!(state.enabled);

        let submitted = registry.submitted.lock().unwrap();
        assert_eq!(submitted[0].0, "/add_device");
        assert_eq!(submitted[0].1[1], ("device_tag".to_string(), "roof".to_string()));
        assert_eq!(client.metrics().snapshot().devices_added, 1);
    }

    #[tokio::test]
    async fn test_rejection_keeps_form() {
        let (client, _registry, page) = client(
            StubRegistry::adding(Err(ClientError::Rejected)),
            ClientOptions::default(),
        );
        client.render_devices(&[device("old")]);

        assert_eq!(client.submit_form().await, Outcome::Failed);

        let state = page.snapshot();
        assert_eq!(state.alerts, vec![messages::ADD_REJECTED.to_string()]);
        assert_eq!(state.fields[0].1, "351234567890123");
        assert_eq!(page.labels(), vec!["old"]);
        assert!(state.enabled);
    }

    #[tokio::test]
    async fn test_transport_error_uses_generic_message() {
        let (client, _registry, page) = client(
            StubRegistry::adding(Err(ClientError::Malformed("not json".to_string()))),
            ClientOptions::default(),
        );

        assert_eq!(client.submit_form().await, Outcome::Failed);
        assert_eq!(page.snapshot().alerts, vec![messages::ADD_ERROR.to_string()]);
        assert_eq!(page.snapshot().fields[1].1, "roof");
    }

    #[tokio::test]
    async fn test_second_submission_while_in_flight_is_refused() {
        let (client, registry, page) = client(
            StubRegistry::adding(Ok(vec![device("1")])).slow(Duration::from_millis(50)),
            ClientOptions::default(),
        );

        let (first, second) = tokio::join!(client.submit_form(), client.submit_form());

        assert_eq!(first, Outcome::Done);
        assert_eq!(second, Outcome::Busy);
        assert_eq!(registry.add_calls.load(Ordering::SeqCst), 1);
        assert_eq!(page.snapshot().alerts.len(), 1);
        assert_eq!(client.metrics().snapshot().requests_refused, 1);

        // Settled: the next submission goes through again
        page.fill(&[("imei", "2")]);
        client.submit_form().await;
        assert_eq!(registry.add_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_strict_imei_refuses_before_sending() {
        let (client, registry, page) = client(
            StubRegistry::adding(Ok(vec![])),
            ClientOptions { strict_imei: true },
        );
        page.fill(&[("imei", "12345")]);

        assert_eq!(client.submit_form().await, Outcome::Failed);
        assert_eq!(registry.add_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            page.snapshot().alerts,
            vec!["IMEI must be exactly 15 digits".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_imei_refused() {
        let (client, registry, page) = client(StubRegistry::adding(Ok(vec![])), ClientOptions::default());
        page.fill(&[("device_tag", "roof")]);

        assert_eq!(client.submit_form().await, Outcome::Failed);
        assert_eq!(registry.add_calls.load(Ordering::SeqCst), 0);
        assert_eq!(page.snapshot().alerts, vec!["IMEI is required".to_string()]);
    }
}
