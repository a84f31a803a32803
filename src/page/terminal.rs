//! Line-oriented page for the terminal

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::traits::{
    Action, DetailContent, DeviceDetailView, DeviceForm, DeviceListView, ListEntry, Navigator,
    Notifier,
};
use crate::registry::FormFields;

type Output = Box<dyn Write + Send>;
type Input = Box<dyn BufRead + Send>;

/// Renders the page as text and reads confirmations from a line source.
///
/// List entries are numbered from 1 so the shell can "click" them by
/// number. A reload cannot rebuild anything by itself here; it is recorded
/// and the shell picks it up with [`TerminalPage::take_reload`].
pub struct TerminalPage {
    action: String,
    assume_yes: bool,
    out: Mutex<Output>,
    input: Mutex<Input>,
    fields: Mutex<FormFields>,
    enabled: AtomicBool,
    entries: Mutex<Vec<ListEntry>>,
    detail: Mutex<Option<DetailContent>>,
    reload_requested: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TerminalPage {
    pub fn new(action: impl Into<String>, out: Output, input: Input) -> Self {
        Self {
            action: action.into(),
            assume_yes: false,
            out: Mutex::new(out),
            input: Mutex::new(input),
            fields: Mutex::new(Vec::new()),
            enabled: AtomicBool::new(true),
            entries: Mutex::new(Vec::new()),
            detail: Mutex::new(None),
            reload_requested: AtomicBool::new(false),
        }
    }

    /// Standard output and standard input
    pub fn stdio(action: impl Into<String>) -> Self {
        Self::new(
            action,
            Box::new(std::io::stdout()),
            Box::new(std::io::BufReader::new(std::io::stdin())),
        )
    }

    /// Answer every confirmation with yes without prompting
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Replace the form contents
    pub fn fill(&self, fields: FormFields) {
        *lock(&self.fields) = fields;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Action behind list entry `number` (1-based)
    pub fn entry_action(&self, number: usize) -> Option<Action> {
        let entries = lock(&self.entries);
        number
            .checked_sub(1)
            .and_then(|idx| entries.get(idx))
            .map(|entry| entry.on_click.clone())
    }

    /// Action behind the delete control of the shown device, if any
    pub fn delete_action(&self) -> Option<Action> {
        match &*lock(&self.detail) {
            Some(DetailContent::Device { delete, .. }) => Some(delete.clone()),
            _ => None,
        }
    }

    /// True once per reload request
    pub fn take_reload(&self) -> bool {
        self.reload_requested.swap(false, Ordering::AcqRel)
    }

    /// Drop the detail view, as a fresh page would have none
    pub fn clear_details(&self) {
        *lock(&self.detail) = None;
    }

    /// Read one line from the input; `None` at end of input
    pub fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match lock(&self.input).read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    /// Write text without a newline and flush it, for prompts
    pub fn prompt(&self, text: &str) {
        let mut out = lock(&self.out);
        write!(out, "{}", text).ok();
        out.flush().ok();
    }

    pub fn print(&self, text: &str) {
        let mut out = lock(&self.out);
        writeln!(out, "{}", text).ok();
        out.flush().ok();
    }
}

impl Notifier for TerminalPage {
    fn alert(&self, message: &str) {
        self.print(&format!("! {}", message));
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        self.prompt(&format!("? {} [y/N] ", message));
        match self.read_line() {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

impl Navigator for TerminalPage {
    fn reload(&self) {
        self.reload_requested.store(true, Ordering::Release);
    }
}

impl DeviceForm for TerminalPage {
    fn action(&self) -> String {
        self.action.clone()
    }

    fn fields(&self) -> FormFields {
        lock(&self.fields).clone()
    }

    /// Empties every value; the field names stay, as after a form reset
    fn reset(&self) {
        for (_, value) in lock(&self.fields).iter_mut() {
            value.clear();
        }
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        tracing::trace!(enabled, "Form control toggled");
    }
}

impl DeviceListView for TerminalPage {
    fn clear(&self) {
        lock(&self.entries).clear();
        self.print("Devices:");
    }

    fn append(&self, entry: ListEntry) {
        let number = {
            let mut entries = lock(&self.entries);
            entries.push(entry.clone());
            entries.len()
        };
        self.print(&format!("  [{}] {}", number, entry.label));
    }
}

impl DeviceDetailView for TerminalPage {
    fn replace(&self, content: DetailContent) {
        match &content {
            DetailContent::Device { heading, body, .. } => {
                self.print(&format!("{}\n{}\n(delete: remove this device)", heading, body));
            }
            DetailContent::Message(message) => self.print(message),
        }
        *lock(&self.detail) = Some(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Imei;
    use std::io::Cursor;
    use std::sync::Arc;

    /// Write sink shared with the test so output can be inspected
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn page(input: &str) -> (TerminalPage, SharedBuf) {
        let buf = SharedBuf::default();
        let page = TerminalPage::new(
            "/add_device",
            Box::new(buf.clone()),
            Box::new(Cursor::new(input.as_bytes().to_vec())),
        );
        (page, buf)
    }

    fn entry(imei: &str) -> ListEntry {
        ListEntry {
            label: imei.to_string(),
            on_click: Action::ShowDetails(Imei::new(imei).unwrap()),
        }
    }

    #[test]
    fn test_confirm_reads_answer() {
        let (page, buf) = page("y\nno\n");

        assert!(page.confirm("Delete?"));
        assert!(!page.confirm("Delete?"));
        assert!(!page.confirm("Delete?")); // end of input
        assert!(buf.text().contains("? Delete? [y/N] "));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let (page, buf) = page("");
        let page = page.assume_yes(true);

        assert!(page.confirm("Delete?"));
        assert!(buf.text().is_empty());
    }

    #[test]
    fn test_entries_numbered_from_one() {
        let (page, buf) = page("");
        page.clear();
        page.append(entry("123"));
        page.append(entry("456"));

        assert_eq!(
            page.entry_action(2),
            Some(Action::ShowDetails(Imei::new("456").unwrap()))
        );
        assert_eq!(page.entry_action(0), None);
        assert_eq!(page.entry_action(3), None);
        assert_eq!(buf.text(), "Devices:\n  [1] 123\n  [2] 456\n");
    }

    #[test]
    fn test_delete_action_only_for_device_view() {
        let (page, _buf) = page("");
        assert_eq!(page.delete_action(), None);

        let imei = Imei::new("123").unwrap();
        page.replace(DetailContent::Device {
            heading: "Device ID: 123".to_string(),
            body: "{}".to_string(),
            delete: Action::Delete(imei.clone()),
        });
        assert_eq!(page.delete_action(), Some(Action::Delete(imei)));

        page.replace(DetailContent::Message("Failed".to_string()));
        assert_eq!(page.delete_action(), None);
    }

    #[test]
    fn test_form_enabled_toggles() {
        let (page, _buf) = page("");
        assert!(page.is_enabled());

        page.set_enabled(false);
        assert!(!page.is_enabled());
        page.set_enabled(true);
        assert!(page.is_enabled());
    }

    #[test]
    fn test_reset_keeps_field_names() {
        let (page, _buf) = page("");
        page.fill(vec![
            ("imei".to_string(), "123".to_string()),
            ("device_tag".to_string(), "roof".to_string()),
        ]);

        page.reset();

        assert_eq!(
            page.fields(),
            vec![
                ("imei".to_string(), String::new()),
                ("device_tag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_reload_is_taken_once() {
        let (page, _buf) = page("");
        assert!(!page.take_reload());

        page.reload();
        assert!(page.take_reload());
        assert!(!page.take_reload());
    }
}
