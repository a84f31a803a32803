use crate::registry::{FormFields, Imei};

/// What clicking an entry or control does. The identifier travels inside
/// the value; nothing is ever spliced into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowDetails(Imei),
    Delete(Imei),
}

/// One clickable row of the device list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub on_click: Action,
}

/// Whatever the detail container currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailContent {
    Device {
        heading: String,
        body: String,
        delete: Action,
    },
    Message(String),
}

/// Blocking user prompts
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);

    /// Ask a yes/no question; `false` means the user backed out
    fn confirm(&self, message: &str) -> bool;
}

pub trait Navigator: Send + Sync {
    /// Throw away all page state and rebuild it from the server
    fn reload(&self);
}

/// The add-device form. Submitting it never navigates away.
pub trait DeviceForm: Send + Sync {
    /// Submission target, absolute or relative to the registry base URL
    fn action(&self) -> String;

    /// Named fields in document order
    fn fields(&self) -> FormFields;

    fn reset(&self);

    fn set_enabled(&self, enabled: bool);
}

pub trait DeviceListView: Send + Sync {
    fn clear(&self);

    fn append(&self, entry: ListEntry);
}

pub trait DeviceDetailView: Send + Sync {
    /// Swap out the current content; never appends
    fn replace(&self, content: DetailContent);
}
