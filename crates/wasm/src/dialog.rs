//! Bindings to the page's modal library (SweetAlert2) and the async
//! dialog port on top of it.

use async_trait::async_trait;
use gateshell_core::{DialogOutcome, DialogSpec, FilenameDialog};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Swal, js_name = fire)]
    fn swal_fire(options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = Swal, js_name = clickConfirm)]
    fn swal_click_confirm();
}

/// Trigger the open dialog's confirm action. Used by the key listeners
/// to reroute Enter, which the canvas input capture would otherwise
/// swallow.
pub fn click_confirm() {
    swal_click_confirm();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwalOptions<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_placeholder: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_attributes: Option<InputAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_auto_trim: Option<bool>,
    allow_enter_key: bool,
    show_cancel_button: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirm_button_text: Option<&'a str>,
}

#[derive(Serialize)]
struct InputAttributes {
    required: bool,
    maxlength: usize,
    autocapitalize: &'static str,
    autocorrect: &'static str,
}

impl<'a> SwalOptions<'a> {
    fn notice(title: &'a str) -> Self {
        Self {
            title,
            input: None,
            input_placeholder: None,
            input_attributes: None,
            input_auto_trim: None,
            allow_enter_key: true,
            show_cancel_button: false,
            confirm_button_text: None,
        }
    }

    fn filename_prompt(spec: &'a DialogSpec) -> Self {
        Self {
            title: &spec.title,
            input: Some("text"),
            input_placeholder: Some(&spec.placeholder),
            input_attributes: Some(InputAttributes {
                required: true,
                maxlength: spec.max_length,
                autocapitalize: "off",
                autocorrect: "off",
            }),
            input_auto_trim: Some(spec.auto_trim),
            allow_enter_key: spec.allow_enter_key,
            show_cancel_button: spec.show_cancel,
            confirm_button_text: Some(&spec.confirm_label),
        }
    }

    fn to_js(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(self)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)
    }
}

pub struct SwalDialog;

#[async_trait(?Send)]
impl FilenameDialog for SwalDialog {
    async fn prompt(&self, spec: &DialogSpec) -> DialogOutcome {
        let options = match SwalOptions::filename_prompt(spec).to_js() {
            Ok(options) => options,
            Err(e) => {
                tracing::error!("failed to build dialog options: {e:?}");
                return DialogOutcome::Cancelled;
            }
        };

        // The validator has to be a JS function, so it is grafted onto
        // the parsed options object.
        let message = spec.validation_message.clone();
        let validator = Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |value: JsValue| {
            match value.as_string().filter(|v| !v.trim().is_empty()) {
                Some(_) => JsValue::UNDEFINED,
                None => JsValue::from_str(&message),
            }
        });
        if let Err(e) =
            js_sys::Reflect::set(&options, &"inputValidator".into(), validator.as_ref())
        {
            tracing::error!("failed to attach dialog validator: {e:?}");
            return DialogOutcome::Cancelled;
        }

        let result = JsFuture::from(swal_fire(&options)).await;
        drop(validator);

        match result {
            Ok(resolution) => js_sys::Reflect::get(&resolution, &"value".into())
                .ok()
                .and_then(|v| v.as_string())
                .filter(|name| !name.is_empty())
                .map(DialogOutcome::Confirmed)
                .unwrap_or(DialogOutcome::Cancelled),
            Err(_) => DialogOutcome::Cancelled,
        }
    }

    async fn notify(&self, title: &str) {
        match SwalOptions::notice(title).to_js() {
            Ok(options) => {
                let _ = JsFuture::from(swal_fire(&options)).await;
            }
            Err(e) => tracing::error!("failed to build notice options: {e:?}"),
        }
    }

    fn click_confirm(&self) {
        swal_click_confirm();
    }
}
