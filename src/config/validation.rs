use super::models::Config;
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported base_url scheme '{scheme}', expected 'http://' or 'https://'")]
    UnsupportedScheme { scheme: String },

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },

    #[error("form.action must not be empty")]
    EmptyFormAction,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_http(config)?;
    validate_form(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    let url = Url::parse(&config.server.base_url).map_err(|e| ValidationError::InvalidBaseUrl {
        url: config.server.base_url.clone(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

fn validate_http(config: &Config) -> Result<(), ValidationError> {
    let timeouts = [
        ("http.connect_timeout_secs", config.http.connect_timeout_secs),
        ("http.request_timeout_secs", config.http.request_timeout_secs),
    ];

    for (field, value) in timeouts {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
                value,
            });
        }
    }

    Ok(())
}

fn validate_form(config: &Config) -> Result<(), ValidationError> {
    if config.form.action.trim().is_empty() {
        return Err(ValidationError::EmptyFormAction);
    }
    Ok(())
}
