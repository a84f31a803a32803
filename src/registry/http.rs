//! HTTP transport for the registry

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::error::{ClientError, Result};
use super::models::{self, Device, Imei};
use super::traits::{FormFields, RegistryApi};
use crate::config::HttpConfig;

const DELETE_PATH: &str = "delete/swan";
const DETAILS_PATH: &str = "get_device_details";
const LIST_PATH: &str = "get_swan_devices";

/// Registry client over reqwest
pub struct HttpRegistry {
    client: Client,
    base_url: Url,
}

impl HttpRegistry {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str, config: &HttpConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a form action the way a browser resolves it against the page
    pub fn resolve_action(&self, action: &str) -> Result<Url> {
        self.base_url
            .join(action)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", action, e)))
    }

    /// Build `<base>/<path>/<imei>` with the IMEI encoded as one segment
    fn endpoint(&self, path: &str, imei: Option<&Imei>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(path.split('/'));
            if let Some(imei) = imei {
                segments.push(imei.as_str());
            }
        }
        Ok(url)
    }

    async fn read_json(response: Response) -> Result<Value> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn ensure_success(url: &Url, response: &Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "Registry answered with error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RegistryApi for HttpRegistry {
    async fn add_device(&self, action: &str, fields: &FormFields) -> Result<Vec<Device>> {
        let url = self.resolve_action(action)?;
        let form = fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));

        debug!(%url, fields = fields.len(), "Submitting device form");

        let response = self.client.post(url.clone()).multipart(form).send().await?;
        debug!(%url, status = response.status().as_u16(), "Device form answered");

        // The body decides the outcome, not the status code.
        models::parse_add_response(Self::read_json(response).await?)
    }

    async fn delete_device(&self, imei: &Imei) -> Result<()> {
        let url = self.endpoint(DELETE_PATH, Some(imei))?;
        debug!(%url, %imei, "Deleting device");

        let response = self.client.delete(url.clone()).send().await?;
        Self::ensure_success(&url, &response)
    }

    async fn device_details(&self, imei: &Imei) -> Result<Device> {
        let url = self.endpoint(DETAILS_PATH, Some(imei))?;
        debug!(%url, %imei, "Fetching device details");

        let response = self.client.get(url).send().await?;
        models::parse_detail_response(imei, Self::read_json(response).await?)
    }

    async fn list_devices(&self) -> Result<Vec<Device>> {
        let url = self.endpoint(LIST_PATH, None)?;
        debug!(%url, "Listing devices");

        let response = self.client.get(url.clone()).send().await?;
        Self::ensure_success(&url, &response)?;
        models::parse_device_list(Self::read_json(response).await?)
    }
}
