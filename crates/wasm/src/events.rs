//! Window- and canvas-level event wiring.
//!
//! Key listeners run in the capture phase so they fire before the
//! embedded module's own handlers; see gateshell-core's `keys` module
//! for the decision logic.

use gateshell_core::{KeyEvent, KeyEventKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, Window};

const ENTER_KEY_CODE: u32 = 13;
const S_KEY_CODE: u32 = 83;

pub fn install(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Capture-phase keydown/keyup interception.
    {
        let onkeydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            handle_key(KeyEventKind::Down, &event);
        });
        window.add_event_listener_with_callback_and_bool(
            "keydown",
            onkeydown.as_ref().unchecked_ref(),
            true,
        )?;
        onkeydown.forget();
    }
    {
        let onkeyup = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            handle_key(KeyEventKind::Up, &event);
        });
        window.add_event_listener_with_callback_and_bool(
            "keyup",
            onkeyup.as_ref().unchecked_ref(),
            true,
        )?;
        onkeyup.forget();
    }

    // Keep the canvas at viewport size and tell the module about it.
    {
        let canvas = canvas.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = crate::dom::size_canvas_to_viewport(&canvas);
            let _ = crate::with_shell(|shell| shell.on_resize(width, height));
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let onlost = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let _ = crate::with_shell(|shell| shell.on_context_lost());
            event.prevent_default();
        });
        canvas.add_event_listener_with_callback(
            "webglcontextlost",
            onlost.as_ref().unchecked_ref(),
        )?;
        onlost.forget();
    }

    // Any uncaught runtime error trips the fatal latch.
    {
        let onerror = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let _ = crate::with_shell_mut(|shell| shell.on_uncaught_error());
        });
        window.add_event_listener_with_callback("error", onerror.as_ref().unchecked_ref())?;
        onerror.forget();
    }

    Ok(())
}

fn handle_key(kind: KeyEventKind, event: &KeyboardEvent) {
    let key_event = KeyEvent {
        kind,
        enter: event.key_code() == ENTER_KEY_CODE,
        ctrl_s: event.ctrl_key() && event.key_code() == S_KEY_CODE,
    };
    let Some(decision) = crate::with_shell(|shell| shell.on_key_event(key_event)) else {
        return;
    };
    if decision.stop_propagation {
        event.stop_immediate_propagation();
    }
    if decision.confirm_dialog {
        crate::dialog::click_confirm();
    }
    if decision.prevent_default {
        event.prevent_default();
    }
}
