//! Platform-independent core of the gateshell host shell.
//!
//! Holds the status/progress reporting state machine, the run-dependency
//! counter, the modal save-file protocol and the keyboard suppression
//! gate, all behind port traits so the whole shell can be exercised
//! without a browser.

pub mod config;
pub mod deps;
pub mod keys;
pub mod ports;
pub mod save;
pub mod shell;
pub mod status;

pub use config::ShellConfig;
pub use deps::{DependencyCounter, ALL_DOWNLOADS_COMPLETE};
pub use keys::{KeyDecision, KeyEvent, KeyEventKind, KeyGate};
pub use ports::{
    Clock, DialogOutcome, DialogSpec, DownloadSink, FilenameDialog, HostModule, SaveNameStore,
    StatusSurface,
};
pub use save::{SaveError, SaveOutcome, SaveProtocol, SaveState, MAX_FILENAME_LEN};
pub use shell::{Shell, CONTEXT_LOST_MESSAGE, INITIAL_STATUS};
pub use status::{
    parse_progress, ProgressFields, ReportMode, StatusReporter, DEBOUNCE_WINDOW_MS,
    POST_EXCEPTION_STATUS,
};
