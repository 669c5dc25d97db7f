//! Modal save-file protocol.
//!
//! The module hands over a serialized circuit; the user supplies a
//! filename through the page's modal dialog; a client-side download is
//! triggered on confirmation. Exactly one save interaction may be in
//! flight, and page-level key events are suppressed for precisely the
//! dialog's lifetime.

use std::cell::Cell;

use thiserror::Error;

use crate::config::ShellConfig;
use crate::keys::KeyGate;
use crate::ports::{DialogOutcome, DialogSpec, DownloadSink, FilenameDialog, SaveNameStore};

pub const MAX_FILENAME_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    AwaitingFilename,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { filename: String },
    Cancelled,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("a save dialog is already in progress")]
    AlreadyInProgress,
}

pub struct SaveProtocol<D, S, N> {
    state: Cell<SaveState>,
    gate: KeyGate,
    dialog: D,
    downloads: S,
    names: N,
    config: ShellConfig,
}

impl<D, S, N> SaveProtocol<D, S, N>
where
    D: FilenameDialog,
    S: DownloadSink,
    N: SaveNameStore,
{
    pub fn new(config: ShellConfig, gate: KeyGate, dialog: D, downloads: S, names: N) -> Self {
        Self {
            state: Cell::new(SaveState::Idle),
            gate,
            dialog,
            downloads,
            names,
            config,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state.get()
    }

    /// Ask the user for a filename and download `content` under it.
    ///
    /// Suspends at the dialog for as long as the user takes; the only
    /// way out is confirm or cancel. A second call while a dialog is
    /// open is rejected rather than queued.
    pub async fn request_save(&self, content: &str) -> Result<SaveOutcome, SaveError> {
        if self.state.get() != SaveState::Idle {
            return Err(SaveError::AlreadyInProgress);
        }
        self.state.set(SaveState::AwaitingFilename);

        let spec = self.filename_dialog_spec();
        self.gate.set_suppressing(true);
        let outcome = self.dialog.prompt(&spec).await;
        self.gate.set_suppressing(false);

        let Some(name) = accepted_name(outcome) else {
            self.state.set(SaveState::Idle);
            return Ok(SaveOutcome::Cancelled);
        };

        self.state.set(SaveState::Saving);
        let filename = format!("{}{}", name, self.config.save_suffix);
        self.downloads.save_text_file(content, &filename);
        self.names.remember(&name);
        self.dialog.notify(&self.config.saved_notice(&filename)).await;
        self.state.set(SaveState::Idle);
        Ok(SaveOutcome::Saved { filename })
    }

    fn filename_dialog_spec(&self) -> DialogSpec {
        DialogSpec {
            title: self.config.save_dialog_title.clone(),
            placeholder: self
                .names
                .last_name()
                .unwrap_or_else(|| self.config.save_placeholder.clone()),
            confirm_label: self.config.save_confirm_label.clone(),
            validation_message: self.config.save_validation_message.clone(),
            max_length: MAX_FILENAME_LEN,
            show_cancel: true,
            allow_enter_key: false,
            auto_trim: true,
        }
    }
}

/// The dialog's validator enforces these constraints client-side; they
/// are re-checked here on resolution.
fn accepted_name(outcome: DialogOutcome) -> Option<String> {
    match outcome {
        DialogOutcome::Confirmed(name) => {
            let name = name.trim();
            if name.is_empty() || name.chars().count() > MAX_FILENAME_LEN {
                None
            } else {
                Some(name.to_string())
            }
        }
        DialogOutcome::Cancelled => None,
    }
}
