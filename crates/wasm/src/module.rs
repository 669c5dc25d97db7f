//! The narrow outbound surface of the embedded circuit engine.

use gateshell_core::HostModule;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "Module"], js_name = _gate_resizeWindow)]
    fn gate_resize_window(width: i32, height: i32);
}

pub struct GateModule;

impl HostModule for GateModule {
    fn resize_host_surface(&self, width: i32, height: i32) {
        gate_resize_window(width, height);
    }
}
