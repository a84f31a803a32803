use std::sync::{Mutex, MutexGuard, PoisonError};

use super::traits::{
    DetailContent, DeviceDetailView, DeviceForm, DeviceListView, ListEntry, Navigator, Notifier,
};
use crate::registry::FormFields;

/// Everything a [`MemoryPage`] has been told so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    pub fields: FormFields,
    pub enabled: bool,
    /// Every `set_enabled` call, in order
    pub enabled_changes: Vec<bool>,
    pub entries: Vec<ListEntry>,
    pub detail: Option<DetailContent>,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub reloads: usize,
}

/// Page that renders into memory
#[derive(Debug)]
pub struct MemoryPage {
    action: String,
    confirm_answer: bool,
    state: Mutex<MemoryState>,
}

impl MemoryPage {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            confirm_answer: true,
            state: Mutex::new(MemoryState {
                enabled: true,
                ..MemoryState::default()
            }),
        }
    }

    /// Answer every confirmation prompt with `answer`
    pub fn answering(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    /// Fill the form, as a user typing into it would
    pub fn fill(&self, fields: &[(&str, &str)]) {
        self.state().fields = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
    }

    /// Pre-populate the list, as a server-rendered page would be
    pub fn seed_entries(&self, entries: Vec<ListEntry>) {
        self.state().entries = entries;
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state().clone()
    }

    /// Labels of the list entries, in display order
    pub fn labels(&self) -> Vec<String> {
        self.state().entries.iter().map(|e| e.label.clone()).collect()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for MemoryPage {
    fn alert(&self, message: &str) {
        self.state().alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.state().prompts.push(message.to_string());
        self.confirm_answer
    }
}

impl Navigator for MemoryPage {
    fn reload(&self) {
        self.state().reloads += 1;
    }
}

impl DeviceForm for MemoryPage {
    fn action(&self) -> String {
        self.action.clone()
    }

    fn fields(&self) -> FormFields {
        self.state().fields.clone()
    }

    fn reset(&self) {
        for (_, value) in self.state().fields.iter_mut() {
            value.clear();
        }
    }

    fn set_enabled(&self, enabled: bool) {
        let mut state = self.state();
        state.enabled = enabled;
        state.enabled_changes.push(enabled);
    }
}

impl DeviceListView for MemoryPage {
    fn clear(&self) {
        self.state().entries.clear();
    }

    fn append(&self, entry: ListEntry) {
        self.state().entries.push(entry);
    }
}

impl DeviceDetailView for MemoryPage {
    fn replace(&self, content: DetailContent) {
        self.state().detail = Some(content);
    }
}
