//! User-facing texts. "Failed to ..." means the registry said no,
//! "An error occurred ..." means the call itself went wrong.

pub const ADD_SUCCEEDED: &str = "Device added successfully!";
pub const ADD_REJECTED: &str = "Failed to add device.";
pub const ADD_ERROR: &str = "An error occurred while adding the device.";

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this device?";
pub const DELETE_SUCCEEDED: &str = "Device deleted successfully!";
pub const DELETE_REJECTED: &str = "Failed to delete device.";
pub const DELETE_ERROR: &str = "An error occurred while deleting the device.";

pub const DETAILS_REJECTED: &str = "Failed to load device details.";
pub const DETAILS_ERROR: &str = "An error occurred while loading the device details.";

pub const LIST_REJECTED: &str = "Failed to load device list.";
pub const LIST_ERROR: &str = "An error occurred while loading the device list.";

pub fn detail_heading(imei: &str) -> String {
    format!("Device ID: {}", imei)
}
