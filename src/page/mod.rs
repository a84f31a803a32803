//! View layer the client drives
//!
//! The client never looks anything up globally: it is handed a [`Page`]
//! holding one handle per element it touches. Two implementations ship
//! with the crate:
//!
//! - [`MemoryPage`] - records everything, for headless use and tests
//! - [`TerminalPage`] - line-oriented rendering for `swanctl`

mod memory;
mod terminal;
mod traits;

use std::sync::Arc;

pub use memory::MemoryPage;
pub use terminal::TerminalPage;
pub use traits::{
    Action, DetailContent, DeviceDetailView, DeviceForm, DeviceListView, ListEntry, Navigator,
    Notifier,
};

/// Element handles for one page
#[derive(Clone)]
pub struct Page {
    pub form: Arc<dyn DeviceForm>,
    pub list: Arc<dyn DeviceListView>,
    pub details: Arc<dyn DeviceDetailView>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl Page {
    /// Use one object for every handle
    pub fn from_single<P>(page: Arc<P>) -> Self
    where
        P: DeviceForm + DeviceListView + DeviceDetailView + Notifier + Navigator + 'static,
    {
        Self {
            form: page.clone(),
            list: page.clone(),
            details: page.clone(),
            notifier: page.clone(),
            navigator: page,
        }
    }
}
