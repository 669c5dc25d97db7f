//! The shim context: one object owning every state machine and port.
//!
//! The browser crate holds a single `Shell` for the page session and
//! routes the module's callback surface through it.

use std::rc::Rc;

use crate::config::ShellConfig;
use crate::deps::DependencyCounter;
use crate::keys::{KeyDecision, KeyEvent, KeyGate};
use crate::ports::{Clock, DownloadSink, FilenameDialog, HostModule, SaveNameStore, StatusSurface};
use crate::save::SaveProtocol;
use crate::status::{ReportMode, StatusReporter};

pub const INITIAL_STATUS: &str = "Downloading...";
pub const CONTEXT_LOST_MESSAGE: &str =
    "WebGL context lost. You will need to reload the page.";

pub struct Shell<Sur, Clk, Mod, D, S, N> {
    reporter: StatusReporter,
    deps: DependencyCounter,
    save: Rc<SaveProtocol<D, S, N>>,
    gate: KeyGate,
    surface: Sur,
    clock: Clk,
    module: Mod,
}

impl<Sur, Clk, Mod, D, S, N> Shell<Sur, Clk, Mod, D, S, N>
where
    Sur: StatusSurface,
    Clk: Clock,
    Mod: HostModule,
    D: FilenameDialog,
    S: DownloadSink,
    N: SaveNameStore,
{
    pub fn new(
        config: ShellConfig,
        surface: Sur,
        clock: Clk,
        module: Mod,
        dialog: D,
        downloads: S,
        names: N,
    ) -> Self {
        let gate = KeyGate::new();
        let save = Rc::new(SaveProtocol::new(config, gate.clone(), dialog, downloads, names));
        Self {
            reporter: StatusReporter::new(),
            deps: DependencyCounter::new(),
            save,
            gate,
            surface,
            clock,
            module,
        }
    }

    /// Informational logging passthrough from the module.
    pub fn print(&self, text: &str) {
        tracing::info!(target: "module", "{text}");
    }

    pub fn set_status(&mut self, text: &str) {
        let now = self.clock.now_ms();
        self.reporter.report(text, now, &self.surface);
    }

    pub fn monitor_run_dependencies(&mut self, remaining: u32) {
        let text = self.deps.update(remaining);
        self.set_status(&text);
    }

    /// Handle on the save protocol, cloneable out of the shell so the
    /// save future can run without holding the shell borrowed.
    pub fn save_protocol(&self) -> Rc<SaveProtocol<D, S, N>> {
        self.save.clone()
    }

    pub fn on_resize(&self, width: i32, height: i32) {
        self.module.resize_host_surface(width, height);
    }

    pub fn on_key_event(&self, event: KeyEvent) -> KeyDecision {
        self.gate.decide(event)
    }

    pub fn on_uncaught_error(&mut self) {
        let now = self.clock.now_ms();
        self.reporter.trip_fatal(now, &self.surface);
    }

    pub fn on_context_lost(&self) {
        self.surface.alert(CONTEXT_LOST_MESSAGE);
    }

    pub fn report_mode(&self) -> ReportMode {
        self.reporter.mode()
    }

    pub fn gate(&self) -> KeyGate {
        self.gate.clone()
    }
}
