//! Boundary traits between the shell's state machines and the page.
//!
//! The browser crate implements these against the real DOM, the page's
//! modal library and the embedded module; tests substitute fakes.

use async_trait::async_trait;

/// How the shell paints status onto the page.
pub trait StatusSurface {
    fn set_status_text(&self, text: &str);
    fn set_progress(&self, value: u32, max: u32);
    fn clear_progress(&self);
    fn set_spinner_visible(&self, visible: bool);
    fn alert(&self, message: &str);
}

/// What a filename prompt resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed(String),
    Cancelled,
}

/// Everything the modal library needs to render the filename prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
    pub title: String,
    pub placeholder: String,
    pub confirm_label: String,
    pub validation_message: String,
    pub max_length: usize,
    pub show_cancel: bool,
    pub allow_enter_key: bool,
    pub auto_trim: bool,
}

/// The page's singleton modal dialog.
///
/// `prompt` suspends until the user confirms or cancels; there is no
/// timeout and no programmatic cancel.
#[async_trait(?Send)]
pub trait FilenameDialog {
    async fn prompt(&self, spec: &DialogSpec) -> DialogOutcome;

    /// Title-only notice dialog, awaited until dismissed.
    async fn notify(&self, title: &str);

    /// Programmatically trigger the open dialog's confirm action.
    fn click_confirm(&self);
}

/// Client-side file download trigger, fire-and-forget.
pub trait DownloadSink {
    fn save_text_file(&self, contents: &str, filename: &str);
}

/// The narrow outbound surface of the embedded module.
pub trait HostModule {
    fn resize_host_surface(&self, width: i32, height: i32);
}

/// Millisecond wall clock feeding the status debounce.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Remembers the last filename the user saved under.
pub trait SaveNameStore {
    fn last_name(&self) -> Option<String>;
    fn remember(&self, name: &str);
}
