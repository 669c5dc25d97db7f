//! DOM-backed status surface and page element lookup.

use gateshell_core::{Clock, ShellConfig, StatusSurface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlProgressElement};

const CONFIG_ELEMENT_ID: &str = "gateshell-config";

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

/// The status line, progress bar and spinner of the host page.
pub struct DomSurface {
    status: HtmlElement,
    progress: HtmlProgressElement,
    spinner: HtmlElement,
}

impl DomSurface {
    pub fn from_page() -> Result<Self, JsValue> {
        let document = document()?;
        Ok(Self {
            status: element(&document, "status")?,
            progress: element(&document, "progress")?,
            spinner: element(&document, "spinner")?,
        })
    }
}

impl StatusSurface for DomSurface {
    fn set_status_text(&self, text: &str) {
        self.status.set_inner_html(text);
    }

    fn set_progress(&self, value: u32, max: u32) {
        self.progress.set_value(value as f64);
        self.progress.set_max(max as f64);
        self.progress.set_hidden(false);
    }

    fn clear_progress(&self) {
        let _ = self.progress.remove_attribute("value");
        let _ = self.progress.remove_attribute("max");
        self.progress.set_hidden(true);
    }

    fn set_spinner_visible(&self, visible: bool) {
        if visible {
            self.spinner.set_hidden(false);
            let _ = self.spinner.style().remove_property("display");
        } else {
            let _ = self.spinner.style().set_property("display", "none");
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

pub fn canvas() -> Result<HtmlCanvasElement, JsValue> {
    element(&document()?, "canvas")
}

pub fn viewport_size() -> (i32, i32) {
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as i32;
    match web_sys::window() {
        Some(window) => (size(window.inner_width()), size(window.inner_height())),
        None => (0, 0),
    }
}

pub fn size_canvas_to_viewport(canvas: &HtmlCanvasElement) -> (i32, i32) {
    let (width, height) = viewport_size();
    canvas.set_width(width.max(0) as u32);
    canvas.set_height(height.max(0) as u32);
    (width, height)
}

/// Optional JSON config blob embedded in the page.
pub fn embedded_config() -> Option<ShellConfig> {
    let document = document().ok()?;
    let text = document.get_element_by_id(CONFIG_ELEMENT_ID)?.text_content()?;
    match ShellConfig::from_json(&text) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("ignoring malformed shell config: {e}");
            None
        }
    }
}

/// Millisecond clock for the status debounce.
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
