//! End-to-end exercises of the shell's callback surface with fake ports.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use gateshell_core::{
    Clock, DialogOutcome, DialogSpec, DownloadSink, FilenameDialog, HostModule, KeyEvent,
    KeyEventKind, ReportMode, SaveNameStore, SaveOutcome, Shell, ShellConfig, StatusSurface,
    ALL_DOWNLOADS_COMPLETE,
};

#[derive(Clone, Default)]
struct FakeSurface {
    statuses: Rc<RefCell<Vec<String>>>,
    progress: Rc<RefCell<Vec<Option<(u32, u32)>>>>,
    spinner: Rc<RefCell<Vec<bool>>>,
    alerts: Rc<RefCell<Vec<String>>>,
}

impl FakeSurface {
    fn mutation_count(&self) -> usize {
        self.statuses.borrow().len() + self.progress.borrow().len() + self.spinner.borrow().len()
    }
}

impl StatusSurface for FakeSurface {
    fn set_status_text(&self, text: &str) {
        self.statuses.borrow_mut().push(text.to_string());
    }
    fn set_progress(&self, value: u32, max: u32) {
        self.progress.borrow_mut().push(Some((value, max)));
    }
    fn clear_progress(&self) {
        self.progress.borrow_mut().push(None);
    }
    fn set_spinner_visible(&self, visible: bool) {
        self.spinner.borrow_mut().push(visible);
    }
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[derive(Clone)]
struct FakeClock {
    now: Rc<Cell<f64>>,
}

impl FakeClock {
    fn new() -> Self {
        Self { now: Rc::new(Cell::new(0.0)) }
    }

    fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Clone, Default)]
struct FakeModule {
    resizes: Rc<RefCell<Vec<(i32, i32)>>>,
}

impl HostModule for FakeModule {
    fn resize_host_surface(&self, width: i32, height: i32) {
        self.resizes.borrow_mut().push((width, height));
    }
}

#[derive(Clone, Default)]
struct FakeDialog {
    outcome: Rc<RefCell<Option<DialogOutcome>>>,
    blocked_on: Rc<RefCell<Option<tokio::sync::oneshot::Receiver<DialogOutcome>>>>,
    prompts: Rc<RefCell<Vec<DialogSpec>>>,
    notices: Rc<RefCell<Vec<String>>>,
}

impl FakeDialog {
    fn resolving(outcome: DialogOutcome) -> Self {
        let dialog = Self::default();
        *dialog.outcome.borrow_mut() = Some(outcome);
        dialog
    }

    fn blocked(rx: tokio::sync::oneshot::Receiver<DialogOutcome>) -> Self {
        let dialog = Self::default();
        *dialog.blocked_on.borrow_mut() = Some(rx);
        dialog
    }
}

#[async_trait(?Send)]
impl FilenameDialog for FakeDialog {
    async fn prompt(&self, spec: &DialogSpec) -> DialogOutcome {
        self.prompts.borrow_mut().push(spec.clone());
        let blocked = self.blocked_on.borrow_mut().take();
        if let Some(rx) = blocked {
            return rx.await.unwrap_or(DialogOutcome::Cancelled);
        }
        self.outcome.borrow_mut().take().expect("unexpected prompt")
    }

    async fn notify(&self, title: &str) {
        self.notices.borrow_mut().push(title.to_string());
    }

    fn click_confirm(&self) {}
}

#[derive(Clone, Default)]
struct FakeSink {
    files: Rc<RefCell<Vec<(String, String)>>>,
}

impl DownloadSink for FakeSink {
    fn save_text_file(&self, contents: &str, filename: &str) {
        self.files
            .borrow_mut()
            .push((contents.to_string(), filename.to_string()));
    }
}

#[derive(Clone, Default)]
struct FakeNames {
    name: Rc<RefCell<Option<String>>>,
}

impl SaveNameStore for FakeNames {
    fn last_name(&self) -> Option<String> {
        self.name.borrow().clone()
    }
    fn remember(&self, name: &str) {
        *self.name.borrow_mut() = Some(name.to_string());
    }
}

type TestShell = Shell<FakeSurface, FakeClock, FakeModule, FakeDialog, FakeSink, FakeNames>;

struct Harness {
    shell: TestShell,
    surface: FakeSurface,
    clock: FakeClock,
    module: FakeModule,
    dialog: FakeDialog,
    sink: FakeSink,
}

fn harness(dialog: FakeDialog) -> Harness {
    let surface = FakeSurface::default();
    let clock = FakeClock::new();
    let module = FakeModule::default();
    let sink = FakeSink::default();
    let shell = Shell::new(
        ShellConfig::default(),
        surface.clone(),
        clock.clone(),
        module.clone(),
        dialog.clone(),
        sink.clone(),
        FakeNames::default(),
    );
    Harness { shell, surface, clock, module, dialog, sink }
}

fn enter_down() -> KeyEvent {
    KeyEvent { kind: KeyEventKind::Down, enter: true, ctrl_s: false }
}

#[test]
fn dependency_countdown_drives_the_reporter() {
    let mut h = harness(FakeDialog::default());

    h.shell.monitor_run_dependencies(5);
    h.clock.advance(100.0);
    h.shell.monitor_run_dependencies(5);
    h.clock.advance(100.0);
    h.shell.monitor_run_dependencies(0);

    assert_eq!(
        h.surface.statuses.borrow().as_slice(),
        ["Preparing...", ALL_DOWNLOADS_COMPLETE]
    );
    assert_eq!(
        h.surface.progress.borrow().as_slice(),
        [Some((0, 500)), None]
    );
}

#[test]
fn progress_ticks_are_debounced_through_the_shell() {
    let mut h = harness(FakeDialog::default());

    h.shell.set_status("Loading (1/10)");
    h.clock.advance(10.0);
    h.shell.set_status("Loading (2/10)");
    h.clock.advance(31.0);
    h.shell.set_status("Loading (3/10)");

    assert_eq!(
        h.surface.progress.borrow().as_slice(),
        [Some((100, 1000)), Some((300, 1000))]
    );
}

#[test]
fn resize_forwards_viewport_dimensions_to_the_module() {
    let h = harness(FakeDialog::default());
    h.shell.on_resize(1920, 1080);
    assert_eq!(h.module.resizes.borrow().as_slice(), [(1920, 1080)]);
}

#[test]
fn context_lost_raises_an_alert() {
    let h = harness(FakeDialog::default());
    h.shell.on_context_lost();
    assert_eq!(h.surface.alerts.borrow().len(), 1);
}

#[test]
fn fatal_latch_degrades_status_reporting_permanently() {
    let mut h = harness(FakeDialog::default());

    h.shell.set_status("Loading (1/10)");
    h.clock.advance(100.0);
    h.shell.on_uncaught_error();
    assert_eq!(h.shell.report_mode(), ReportMode::Degraded);

    let frozen = h.surface.mutation_count();
    h.clock.advance(100.0);
    h.shell.set_status("X");
    h.shell.monitor_run_dependencies(3);
    assert_eq!(h.surface.mutation_count(), frozen);
}

#[tokio::test]
async fn save_round_trip_downloads_and_confirms() {
    let h = harness(FakeDialog::resolving(DialogOutcome::Confirmed("circuit1".into())));

    let outcome = h.shell.save_protocol().request_save("{}").await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved { filename: "circuit1.json".into() });
    assert_eq!(
        h.sink.files.borrow().as_slice(),
        [("{}".to_string(), "circuit1.json".to_string())]
    );
    assert_eq!(h.dialog.notices.borrow().as_slice(), ["File circuit1.json saved!"]);
}

#[tokio::test]
async fn cancelled_save_resolves_without_a_download() {
    let h = harness(FakeDialog::resolving(DialogOutcome::Cancelled));
    let outcome = h.shell.save_protocol().request_save("{}").await.unwrap();
    assert_eq!(outcome, SaveOutcome::Cancelled);
    assert!(h.sink.files.borrow().is_empty());
    assert!(h.dialog.notices.borrow().is_empty());
}

#[tokio::test]
async fn enter_is_captured_only_while_the_dialog_is_open() {
    let (resolve, rx) = tokio::sync::oneshot::channel();
    let h = harness(FakeDialog::blocked(rx));

    // Before the dialog: Enter flows through to the module.
    assert!(!h.shell.on_key_event(enter_down()).stop_propagation);

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let protocol = h.shell.save_protocol();
            let save = tokio::task::spawn_local(async move {
                protocol.request_save("{}").await
            });
            while h.dialog.prompts.borrow().is_empty() {
                tokio::task::yield_now().await;
            }

            // Dialog open: propagation stopped, Enter rerouted to confirm.
            let decision = h.shell.on_key_event(enter_down());
            assert!(decision.stop_propagation);
            assert!(decision.confirm_dialog);

            resolve.send(DialogOutcome::Confirmed("circuit1".into())).unwrap();
            save.await.unwrap().unwrap();

            // Resolved: events flow through again.
            let decision = h.shell.on_key_event(enter_down());
            assert!(!decision.stop_propagation);
            assert!(!decision.confirm_dialog);
        })
        .await;
}
