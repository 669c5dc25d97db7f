//! Browser entry point and the callback surface the module loader calls.
//!
//! One `Shell` lives for the page session on the main thread; the
//! exported `shell_*` functions are handed to the Emscripten-style
//! loader as its `print` / `setStatus` / `monitorRunDependencies` /
//! `saveFile` hooks.

mod dialog;
mod dom;
mod download;
mod events;
mod module;
mod storage;

use std::cell::RefCell;

use gateshell_core::{Shell, INITIAL_STATUS};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::dialog::SwalDialog;
use crate::dom::{DateClock, DomSurface};
use crate::download::BlobDownloads;
use crate::module::GateModule;
use crate::storage::LocalNameStore;

type BrowserShell =
    Shell<DomSurface, DateClock, GateModule, SwalDialog, BlobDownloads, LocalNameStore>;

thread_local! {
    static SHELL: RefCell<Option<BrowserShell>> = const { RefCell::new(None) };
}

pub(crate) fn with_shell<R>(f: impl FnOnce(&BrowserShell) -> R) -> Option<R> {
    SHELL.with(|cell| cell.borrow().as_ref().map(f))
}

pub(crate) fn with_shell_mut<R>(f: impl FnOnce(&mut BrowserShell) -> R) -> Option<R> {
    SHELL.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let canvas = dom::canvas()?;
    dom::size_canvas_to_viewport(&canvas);

    let config = dom::embedded_config().unwrap_or_default();
    let shell = Shell::new(
        config,
        DomSurface::from_page()?,
        DateClock,
        GateModule,
        SwalDialog,
        BlobDownloads,
        LocalNameStore,
    );
    SHELL.with(|cell| *cell.borrow_mut() = Some(shell));

    events::install(&window, &canvas)?;
    let _ = with_shell_mut(|shell| shell.set_status(INITIAL_STATUS));
    Ok(())
}

/// Informational logging passthrough from the module.
#[wasm_bindgen]
pub fn shell_print(text: &str) {
    let _ = with_shell(|shell| shell.print(text));
}

#[wasm_bindgen]
pub fn shell_set_status(text: &str) {
    let _ = with_shell_mut(|shell| shell.set_status(text));
}

#[wasm_bindgen]
pub fn shell_monitor_run_dependencies(remaining: u32) {
    let _ = with_shell_mut(|shell| shell.monitor_run_dependencies(remaining));
}

/// Ask the user for a filename and download `content` under it.
///
/// The returned promise resolves once the interaction finishes and
/// rejects if a save dialog is already open.
#[wasm_bindgen]
pub fn shell_save_file(content: String) -> js_sys::Promise {
    let protocol = with_shell(|shell| shell.save_protocol());
    future_to_promise(async move {
        let Some(protocol) = protocol else {
            return Err(JsValue::from_str("shell not initialized"));
        };
        match protocol.request_save(&content).await {
            Ok(_) => Ok(JsValue::UNDEFINED),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    })
}
