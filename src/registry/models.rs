//! Wire models for the swan registry.
//!
//! Device records are open-ended: apart from `imei` the client never looks
//! inside them, it only renders them. Records are kept as JSON maps with the
//! server's key order intact (`serde_json/preserve_order`).
//!
//! # Response shapes
//!
//! ```json
//! { "success": true, "devices": [ { "imei": "351234567890123", "device_tag": "" } ] }
//! { "success": true, "device": { "imei": "351234567890123", "ntp_port": 123 } }
//! [ { "351234567890123": { "device_tag": "" } } ]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use super::error::{ClientError, Result};

/// Length the registry's own form enforces for an IMEI
pub const IMEI_LEN: usize = 15;

/// Device identifier, the primary key throughout the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imei(String);

impl Imei {
    /// Accepts any non-blank identifier, as the registry hands them out.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ClientError::InvalidImei("IMEI is required".to_string()));
        }
        Ok(Self(value))
    }

    /// Accepts only the 15-digit form the registry's add form validates.
    pub fn parse_strict(value: &str) -> Result<Self> {
        let imei = Self::new(value)?;
        if imei.0.len() != IMEI_LEN || !imei.0.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClientError::InvalidImei(format!(
                "IMEI must be exactly {} digits",
                IMEI_LEN
            )));
        }
        Ok(imei)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Imei {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Imei> for String {
    fn from(value: Imei) -> Self {
        value.0
    }
}

/// One device record as returned by the registry
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    imei: Imei,
    record: Map<String, Value>,
}

impl Device {
    /// Build from a record that carries its own `imei` field.
    pub fn from_record(record: Map<String, Value>) -> Result<Self> {
        let imei = record
            .get("imei")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Malformed("device record has no imei".to_string()))
            .and_then(Imei::new)?;

        Ok(Self { imei, record })
    }

    /// Build from a record whose identity is known from elsewhere (a map key
    /// or the request path). The record is kept as-is.
    pub fn keyed(imei: Imei, record: Map<String, Value>) -> Self {
        Self { imei, record }
    }

    pub fn imei(&self) -> &Imei {
        &self.imei
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Two-space indented JSON of the record, in the server's key order
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.record).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Device {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Device::from_record(record).map_err(serde::de::Error::custom)
    }
}

/// Only a literal `true` counts as success; a missing flag does not.
fn is_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

/// Decode the add-device response into the registry's current device list.
pub fn parse_add_response(body: Value) -> Result<Vec<Device>> {
    if !is_success(&body) {
        return Err(ClientError::Rejected);
    }

    let devices = body
        .get("devices")
        .cloned()
        .ok_or_else(|| ClientError::Malformed("response has no devices".to_string()))?;

    Ok(serde_json::from_value(devices)?)
}

/// Decode the device-details response for the device requested as `imei`.
pub fn parse_detail_response(imei: &Imei, body: Value) -> Result<Device> {
    if !is_success(&body) {
        return Err(ClientError::Rejected);
    }

    match body.get("device") {
        Some(Value::Object(record)) => Ok(Device::keyed(imei.clone(), record.clone())),
        Some(_) => Err(ClientError::Malformed("device is not an object".to_string())),
        None => Err(ClientError::Malformed("response has no device".to_string())),
    }
}

/// Decode the device listing.
///
/// Entries come either keyed by IMEI (`{"<imei>": {...}}`) or as bare
/// records with an `imei` field. Order is preserved.
pub fn parse_device_list(body: Value) -> Result<Vec<Device>> {
    let Value::Array(entries) = body else {
        return Err(ClientError::Malformed("device list is not an array".to_string()));
    };

    entries.into_iter().map(parse_list_entry).collect()
}

fn parse_list_entry(entry: Value) -> Result<Device> {
    let Value::Object(map) = entry else {
        return Err(ClientError::Malformed("device entry is not an object".to_string()));
    };

    if map.get("imei").is_some_and(Value::is_string) {
        return Device::from_record(map);
    }

    if map.len() == 1 {
        if let Some((key, Value::Object(mut record))) = map.into_iter().next() {
            let imei = Imei::new(key)?;
            if !record.contains_key("imei") {
                record.insert("imei".to_string(), Value::String(imei.to_string()));
            }
            return Ok(Device::keyed(imei, record));
        }
    }

    Err(ClientError::Malformed("unrecognised device entry".to_string()))
}
