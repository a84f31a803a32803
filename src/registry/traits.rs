use async_trait::async_trait;

use super::error::Result;
use super::models::{Device, Imei};

/// Ordered `name=value` pairs, as a form serialises them
pub type FormFields = Vec<(String, String)>;

/// The registry server as seen by the client.
///
/// One method per endpoint. Implementations perform exactly one request per
/// call and never retry; deciding what a failure means for the user is left
/// to the caller.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// POST the form fields to `action` and return the device list the
    /// server answers with
    async fn add_device(&self, action: &str, fields: &FormFields) -> Result<Vec<Device>>;

    /// DELETE the device; any 2xx counts as success, the body is ignored
    async fn delete_device(&self, imei: &Imei) -> Result<()>;

    /// Fetch the full record of one device
    async fn device_details(&self, imei: &Imei) -> Result<Device>;

    /// Fetch every registered device
    async fn list_devices(&self) -> Result<Vec<Device>>;
}
